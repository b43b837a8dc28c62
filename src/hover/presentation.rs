/// Presentation states published by resolvers, and the popup-side model
/// that applies them.
use serde::Serialize;
use tracing::debug;

use super::StreamKind;
use crate::translation::TranslationEntry;

pub const NO_SCREEN_TEXT: &str = "No Russian text found in this area";
pub const NO_WORD: &str = "No Russian word under the pointer";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Presentation {
    /// A cycle started; nothing is known yet.
    Loading,
    /// Word and pronunciation known, translation still in flight.
    Pending { word: String, pronunciation: String },
    Translated {
        word: String,
        pronunciation: String,
        entry: TranslationEntry,
    },
    Error {
        word: String,
        pronunciation: String,
        message: String,
    },
    /// No Russian word was found.
    Empty { message: String },
    Hidden,
}

impl Presentation {
    /// Whether this state ends a cycle.
    #[must_use]
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Translated { .. } | Self::Error { .. } | Self::Empty { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationUpdate {
    pub stream: StreamKind,
    /// Resolver-local sequence number; grows on every cycle and every hide.
    pub cycle: u64,
    pub presentation: Presentation,
}

/// What a popup currently shows.
///
/// Updates from a cycle older than the newest one applied are dropped, so a
/// translation that lands after the popup was hidden does not reopen it.
#[derive(Debug, Default)]
pub struct PopupModel {
    cycle: u64,
    shown: Option<Presentation>,
}

impl PopupModel {
    /// Apply `update`; returns `false` when it was stale and ignored.
    pub fn apply(&mut self, update: PresentationUpdate) -> bool {
        if update.cycle < self.cycle {
            debug!(
                "Dropping stale {:?} update from cycle {} (current {})",
                update.stream, update.cycle, self.cycle
            );
            return false;
        }
        self.cycle = update.cycle;
        self.shown = match update.presentation {
            Presentation::Hidden => None,
            other => Some(other),
        };
        true
    }

    #[must_use]
    pub fn current(&self) -> Option<&Presentation> {
        self.shown.as_ref()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.shown.is_some()
    }
}
