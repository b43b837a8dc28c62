/// Hover resolution state machine.
///
/// One resolver serves one input stream. It turns pointer events into
/// settle triggers via a [`HoverSession`], resolves each trigger into a
/// word, and publishes [`PresentationUpdate`]s: `Loading`, then the word
/// with its pronunciation, then the translation (or a terminal
/// `Empty`/`Error`).
///
/// All state lives on the task running [`HoverResolver::run`]. A resolution
/// cycle is a future owned by that loop and polled alongside incoming
/// events, so motion keeps being consumed while recognition or a
/// translation fetch is outstanding. Only one cycle may be in flight; a
/// settle that arrives meanwhile is dropped. Cycles are never cancelled,
/// not even by a dismiss; their late output is tagged with the old cycle
/// number and filtered by the popup.
use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::presentation::{NO_SCREEN_TEXT, NO_WORD};
use super::{
    HoverContext, HoverEvent, HoverSession, Presentation, PresentationUpdate, ResolverOptions,
    StreamKind, Trigger,
};
use crate::locator;
use crate::translation::TranslationEntry;

/// Externally visible state of a resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverState {
    Idle,
    /// Waiting for the pointer to settle; `word` is unknown on the screen
    /// stream until recognition runs.
    Armed {
        word: Option<String>,
        deadline: Instant,
    },
    Resolving {
        word: Option<String>,
    },
    /// `word` is `None` when no Russian word was found.
    Presenting {
        word: Option<String>,
        entry: Option<TranslationEntry>,
    },
}

/// Resolver-owned lifecycle; `Armed` is derived from the session.
#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Resolving { cycle: u64, word: Option<String> },
    Presenting {
        word: Option<String>,
        entry: Option<TranslationEntry>,
    },
}

/// Result of one resolution cycle.
#[derive(Debug)]
struct CycleOutcome {
    cycle: u64,
    word: Option<String>,
    entry: Option<TranslationEntry>,
}

/// Publishes presentation states for a single cycle.
#[derive(Clone)]
struct Publisher {
    stream: StreamKind,
    cycle: u64,
    sink: mpsc::UnboundedSender<PresentationUpdate>,
}

impl Publisher {
    fn publish(&self, presentation: Presentation) {
        let update = PresentationUpdate {
            stream: self.stream,
            cycle: self.cycle,
            presentation,
        };
        if self.sink.send(update).is_err() {
            debug!("Presentation sink closed, dropping update");
        }
    }
}

pub struct HoverResolver {
    stream: StreamKind,
    ctx: HoverContext,
    options: ResolverOptions,
    session: HoverSession,
    phase: Phase,
    enabled: bool,
    buffer: String,
    last_offset: Option<usize>,
    cycle: u64,
    hide_at: Option<Instant>,
    sink: mpsc::UnboundedSender<PresentationUpdate>,
    in_flight: Option<BoxFuture<'static, CycleOutcome>>,
}

impl HoverResolver {
    /// Create a resolver. The text stream starts enabled; the screen stream
    /// starts disabled until an [`HoverEvent::Enable`] arrives.
    pub fn new(
        stream: StreamKind,
        ctx: HoverContext,
        options: ResolverOptions,
        sink: mpsc::UnboundedSender<PresentationUpdate>,
    ) -> Self {
        Self {
            stream,
            ctx,
            session: HoverSession::new(options.debounce),
            options,
            phase: Phase::Idle,
            enabled: stream == StreamKind::Text,
            buffer: String::new(),
            last_offset: None,
            cycle: 0,
            hide_at: None,
            sink,
            in_flight: None,
        }
    }

    #[must_use]
    pub fn stream(&self) -> StreamKind {
        self.stream
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn state(&self) -> HoverState {
        match &self.phase {
            Phase::Idle => match (self.session.armed_trigger(), self.session.deadline()) {
                (Some(trigger), Some(deadline)) => HoverState::Armed {
                    word: match trigger {
                        Trigger::Word(w) => Some(w.clone()),
                        Trigger::Screen { text, .. } => text.clone(),
                    },
                    deadline,
                },
                _ => HoverState::Idle,
            },
            Phase::Resolving { word, .. } => HoverState::Resolving { word: word.clone() },
            Phase::Presenting { word, entry } => HoverState::Presenting {
                word: word.clone(),
                entry: entry.clone(),
            },
        }
    }

    /// Spawn the event loop on the current Tokio runtime.
    pub fn spawn(self, events: mpsc::Receiver<HoverEvent>) -> JoinHandle<()> {
        tokio::spawn(self.run(events))
    }

    /// Process events until the sender side closes, then let any in-flight
    /// cycle finish.
    pub async fn run(mut self, mut events: mpsc::Receiver<HoverEvent>) {
        debug!("{:?} resolver started", self.stream);
        loop {
            let deadline = self.next_deadline();
            tokio::select! {
                outcome = drive(&mut self.in_flight) => {
                    self.in_flight = None;
                    self.finish(outcome);
                }
                event = events.recv() => match event {
                    Some(event) => self.handle(event, Instant::now()),
                    None => break,
                },
                () = sleep_until(deadline) => self.tick(Instant::now()),
            }
        }

        if let Some(cycle) = self.in_flight.take() {
            let outcome = cycle.await;
            self.finish(outcome);
        }
        debug!("{:?} resolver stopped", self.stream);
    }

    /// Apply one event.
    pub fn handle(&mut self, event: HoverEvent, now: Instant) {
        match event {
            HoverEvent::TextChanged(text) => self.buffer = text,
            HoverEvent::Enable => {
                if !self.enabled {
                    info!("{:?} hover enabled", self.stream);
                    self.enabled = true;
                }
            }
            HoverEvent::Disable => {
                if self.enabled {
                    info!("{:?} hover disabled", self.stream);
                    self.enabled = false;
                    self.session.reset();
                    self.last_offset = None;
                    self.hide();
                }
            }
            HoverEvent::Dismiss => self.hide(),
            HoverEvent::PopupEnter => {
                if self.is_showing() {
                    self.hide_at = None;
                }
            }
            HoverEvent::PopupLeave => {
                if self.is_showing() && self.options.auto_hide.is_some() {
                    self.hide_at = Some(now + self.options.exit_grace);
                }
            }
            _ if !self.enabled => {}
            HoverEvent::TextMotion { offset } => self.on_text_motion(offset, now),
            HoverEvent::Leave => {
                if self.stream == StreamKind::Text {
                    self.session.clear_word();
                    self.last_offset = None;
                    self.hide();
                }
            }
            HoverEvent::ScreenMotion(position) => {
                if self.stream == StreamKind::Screen {
                    self.session
                        .observe_motion(position, self.options.move_threshold_px, now);
                }
            }
            HoverEvent::Invoke(trigger) => self.start_cycle(trigger, now),
        }
    }

    /// Fire whatever deadlines have passed at `now`.
    pub fn tick(&mut self, now: Instant) {
        if self.hide_at.is_some_and(|t| t <= now) {
            debug!("{:?} popup timed out", self.stream);
            self.hide();
        }

        if let Some(trigger) = self.session.poll(now) {
            self.on_settle(trigger, now);
        }
    }

    /// Earliest pending deadline: the settle timer or the popup's hide time.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.session.deadline(), self.hide_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn on_text_motion(&mut self, offset: Option<usize>, now: Instant) {
        if self.stream != StreamKind::Text {
            return;
        }
        self.last_offset = offset;

        let word = self.word_under_pointer();
        if !word.is_empty() && locator::is_russian(&word) {
            if self.session.observe_word(&word, now) {
                debug!("Armed on {word:?}");
            }
        } else {
            self.session.clear_word();
            self.hide();
        }
    }

    fn on_settle(&mut self, trigger: Trigger, now: Instant) {
        // Compare against a fresh read; the buffer may have changed under
        // the pointer since the session was armed.
        if let Trigger::Word(armed) = &trigger {
            let current = self.word_under_pointer();
            if *armed != current {
                debug!("Discarding stale trigger {armed:?} (now {current:?})");
                return;
            }
        }
        self.start_cycle(trigger, now);
    }

    fn start_cycle(&mut self, trigger: Trigger, now: Instant) {
        if self.in_flight.is_some() {
            debug!("{:?} settle ignored, a cycle is in flight", self.stream);
            return;
        }

        self.cycle += 1;
        let word = match &trigger {
            Trigger::Word(w) => Some(w.clone()),
            Trigger::Screen { .. } => None,
        };
        debug!("{:?} cycle {} resolving {trigger:?}", self.stream, self.cycle);

        self.phase = Phase::Resolving {
            cycle: self.cycle,
            word,
        };
        self.hide_at = self.options.auto_hide.map(|d| now + d);

        let publisher = Publisher {
            stream: self.stream,
            cycle: self.cycle,
            sink: self.sink.clone(),
        };
        self.in_flight = Some(
            resolve(
                self.ctx.clone(),
                publisher,
                trigger,
                self.options.capture_radius,
            )
            .boxed(),
        );
    }

    fn finish(&mut self, outcome: CycleOutcome) {
        match &self.phase {
            Phase::Resolving { cycle, .. } if *cycle == outcome.cycle => {
                self.phase = Phase::Presenting {
                    word: outcome.word,
                    entry: outcome.entry,
                };
            }
            _ => debug!("Cycle {} finished after its popup closed", outcome.cycle),
        }
    }

    fn is_showing(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Close the popup and return to `Idle`.
    fn hide(&mut self) {
        self.hide_at = None;
        if !self.is_showing() {
            return;
        }
        self.phase = Phase::Idle;
        self.cycle += 1;
        Publisher {
            stream: self.stream,
            cycle: self.cycle,
            sink: self.sink.clone(),
        }
        .publish(Presentation::Hidden);
    }

    fn word_under_pointer(&self) -> String {
        self.last_offset
            .map(|offset| locator::word_at(&self.buffer, offset))
            .unwrap_or_default()
    }
}

/// One resolution cycle: find the word, publish its pronunciation at once,
/// then publish the translation when the cache settles.
async fn resolve(
    ctx: HoverContext,
    publisher: Publisher,
    trigger: Trigger,
    capture_radius: u32,
) -> CycleOutcome {
    publisher.publish(Presentation::Loading);

    let (candidate, empty_message) = match trigger {
        Trigger::Word(word) => (Some(word), NO_WORD),
        Trigger::Screen {
            text: Some(text), ..
        } => (
            locator::first_russian_word(&text).map(str::to_string),
            NO_SCREEN_TEXT,
        ),
        Trigger::Screen {
            position,
            text: None,
        } => {
            let text = match ctx.recognizer.recognize_text(position, capture_radius).await {
                Ok(raw) => locator::normalize_recognized(&raw),
                Err(e) => {
                    warn!("Screen recognition at {position:?} failed: {e}");
                    String::new()
                }
            };
            (
                locator::first_russian_word(&text).map(str::to_string),
                NO_SCREEN_TEXT,
            )
        }
    };

    let Some(word) = candidate.filter(|w| locator::is_russian(w)) else {
        publisher.publish(Presentation::Empty {
            message: empty_message.to_string(),
        });
        return CycleOutcome {
            cycle: publisher.cycle,
            word: None,
            entry: None,
        };
    };

    let pronunciation = ctx.phonetics.pronounce(&word);
    publisher.publish(Presentation::Pending {
        word: word.clone(),
        pronunciation: pronunciation.clone(),
    });

    let entry = ctx.cache.get(&word).await;
    let presentation = match &entry.error {
        Some(err) => Presentation::Error {
            word: word.clone(),
            pronunciation,
            message: format!("Translation error: {err}"),
        },
        None => Presentation::Translated {
            word: word.clone(),
            pronunciation,
            entry: entry.clone(),
        },
    };
    publisher.publish(presentation);

    CycleOutcome {
        cycle: publisher.cycle,
        word: Some(word),
        entry: Some(entry),
    }
}

async fn drive(slot: &mut Option<BoxFuture<'static, CycleOutcome>>) -> CycleOutcome {
    match slot {
        Some(cycle) => cycle.await,
        None => std::future::pending().await,
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
