//! Hover resolution: pointer events in, presentation states out.
//!
//! - **[`session`]** — debounce bookkeeping for one input stream
//! - **[`resolver`]** — the per-stream state machine and its event loop
//! - **[`presentation`]** — states published to the popup, and a popup model
//! - **[`capture`]** — hand-off from a blocking capture thread to a resolver
pub mod capture;
pub mod presentation;
pub mod resolver;
pub mod session;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::config::HoverConfig;
use crate::phonetics::Transliterator;
use crate::recognition::TextRecognizer;
use crate::translation::TranslationCache;

pub use presentation::{PopupModel, Presentation, PresentationUpdate};
pub use resolver::{HoverResolver, HoverState};
pub use session::HoverSession;

/// Screen or widget coordinates in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

/// Which input stream a resolver serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    /// Pointer over the editable text surface.
    Text,
    /// System-wide pointer motion; words come from screen recognition.
    Screen,
}

/// What a settled pointer is interested in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// A word already read from the text buffer.
    Word(String),
    /// A screen point, with text if the caller already has it.
    Screen { position: Point, text: Option<String> },
}

/// Input to a [`HoverResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverEvent {
    /// Replace the text buffer behind the text surface.
    TextChanged(String),
    /// Pointer over the text surface; `offset` is the character under it.
    TextMotion { offset: Option<usize> },
    /// Pointer left the text surface.
    Leave,
    /// Screen-absolute pointer position from the capture hook.
    ScreenMotion(Point),
    /// Resolve immediately, bypassing the debounce window.
    Invoke(Trigger),
    /// Pointer entered the popup.
    PopupEnter,
    /// Pointer left the popup.
    PopupLeave,
    /// Close the popup.
    Dismiss,
    Enable,
    Disable,
}

/// Collaborators shared by every resolver in the process.
#[derive(Clone)]
pub struct HoverContext {
    pub phonetics: Arc<Transliterator>,
    pub cache: Arc<TranslationCache>,
    pub recognizer: Arc<dyn TextRecognizer>,
}

/// Timing and geometry for one resolver.
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    pub debounce: Duration,
    pub move_threshold_px: f64,
    pub capture_radius: u32,
    /// Popup lifetime from the start of a cycle; `None` keeps it open.
    pub auto_hide: Option<Duration>,
    pub exit_grace: Duration,
}

impl ResolverOptions {
    /// Options for the text-surface stream; its popup closes on leave, not on a timer.
    #[must_use]
    pub fn text(config: &HoverConfig) -> Self {
        Self {
            debounce: config.local_debounce(),
            move_threshold_px: config.move_threshold_px,
            capture_radius: config.capture_radius,
            auto_hide: None,
            exit_grace: config.exit_grace(),
        }
    }

    #[must_use]
    pub fn screen(config: &HoverConfig) -> Self {
        Self {
            debounce: config.global_debounce(),
            move_threshold_px: config.move_threshold_px,
            capture_radius: config.capture_radius,
            auto_hide: Some(config.auto_hide()),
            exit_grace: config.exit_grace(),
        }
    }

    #[must_use]
    pub fn for_stream(stream: StreamKind, config: &HoverConfig) -> Self {
        match stream {
            StreamKind::Text => Self::text(config),
            StreamKind::Screen => Self::screen(config),
        }
    }
}
