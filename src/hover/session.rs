/// Debounce state for one pointer stream.
///
/// A session is armed with a deadline on each qualifying observation and
/// fires once the deadline passes without another one. Deadlines are
/// compared against the clock at poll time; there is no timer object to
/// cancel.
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

use super::{Point, Trigger};

#[derive(Debug, Clone)]
struct Armed {
    trigger: Trigger,
    deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct HoverSession {
    window: Duration,
    last_position: Option<Point>,
    last_word: Option<String>,
    armed: Option<Armed>,
}

impl HoverSession {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_position: None,
            last_word: None,
            armed: None,
        }
    }

    /// Record the Russian word under the pointer.
    ///
    /// Re-arms only when the word differs from the current candidate;
    /// returns whether it did.
    pub fn observe_word(&mut self, word: &str, now: Instant) -> bool {
        if self.last_word.as_deref() == Some(word) {
            return false;
        }
        trace!("Candidate word {word:?}, arming");
        self.last_word = Some(word.to_string());
        self.armed = Some(Armed {
            trigger: Trigger::Word(word.to_string()),
            deadline: now + self.window,
        });
        true
    }

    /// Record a screen position.
    ///
    /// Re-arms only when the pointer moved more than `threshold` pixels from
    /// the last recorded position; smaller jitter is ignored entirely.
    pub fn observe_motion(&mut self, position: Point, threshold: f64, now: Instant) -> bool {
        let moved = self
            .last_position
            .is_none_or(|last| last.distance(position) > threshold);
        if !moved {
            return false;
        }
        self.last_position = Some(position);
        self.armed = Some(Armed {
            trigger: Trigger::Screen {
                position,
                text: None,
            },
            deadline: now + self.window,
        });
        true
    }

    /// Forget the candidate word and disarm. Used when the pointer is no
    /// longer over a Russian word.
    pub fn clear_word(&mut self) {
        self.last_word = None;
        self.armed = None;
    }

    /// Return to the freshly created state.
    pub fn reset(&mut self) {
        self.last_position = None;
        self.last_word = None;
        self.armed = None;
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.armed.as_ref().map(|a| a.deadline)
    }

    #[must_use]
    pub fn armed_trigger(&self) -> Option<&Trigger> {
        self.armed.as_ref().map(|a| &a.trigger)
    }

    #[must_use]
    pub fn last_position(&self) -> Option<Point> {
        self.last_position
    }

    /// Take the armed trigger if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Trigger> {
        if self.armed.as_ref()?.deadline > now {
            return None;
        }
        self.armed.take().map(|a| a.trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    #[test]
    fn test_fires_after_window() {
        let t0 = Instant::now();
        let mut session = HoverSession::new(WINDOW);

        assert!(session.observe_word("кот", t0));
        assert_eq!(session.poll(t0 + Duration::from_millis(499)), None);
        assert_eq!(
            session.poll(t0 + WINDOW),
            Some(Trigger::Word("кот".to_string()))
        );
        assert_eq!(session.poll(t0 + WINDOW * 2), None, "fires once");
    }

    #[test]
    fn test_same_word_does_not_rearm() {
        let t0 = Instant::now();
        let mut session = HoverSession::new(WINDOW);

        session.observe_word("кот", t0);
        assert!(!session.observe_word("кот", t0 + Duration::from_millis(400)));
        assert_eq!(session.deadline(), Some(t0 + WINDOW));
    }

    #[test]
    fn test_rapid_words_then_settle() {
        let t0 = Instant::now();
        let mut session = HoverSession::new(WINDOW);
        let words = ["один", "два", "три", "четыре", "пять"];

        let mut fired = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let now = t0 + Duration::from_millis(100 * i as u64);
            session.observe_word(word, now);
            fired.extend(session.poll(now));
        }
        assert!(fired.is_empty());

        let settle_start = t0 + Duration::from_millis(500);
        session.observe_word("шесть", settle_start);
        assert_eq!(session.poll(settle_start + Duration::from_millis(499)), None);
        assert_eq!(
            session.poll(settle_start + WINDOW),
            Some(Trigger::Word("шесть".to_string()))
        );
    }

    #[test]
    fn test_motion_threshold() {
        let t0 = Instant::now();
        let mut session = HoverSession::new(WINDOW);

        assert!(session.observe_motion(Point::new(100, 100), 5.0, t0));
        assert!(!session.observe_motion(Point::new(103, 104), 5.0, t0));
        assert!(session.observe_motion(Point::new(110, 100), 5.0, t0 + WINDOW / 2));

        // Jitter after the last qualifying move does not push the deadline.
        assert!(!session.observe_motion(Point::new(112, 101), 5.0, t0 + WINDOW));
        assert_eq!(
            session.poll(t0 + WINDOW / 2 + WINDOW),
            Some(Trigger::Screen {
                position: Point::new(110, 100),
                text: None
            })
        );
    }

    #[test]
    fn test_clear_word_allows_rearm() {
        let t0 = Instant::now();
        let mut session = HoverSession::new(WINDOW);

        session.observe_word("кот", t0);
        session.clear_word();
        assert_eq!(session.deadline(), None);
        assert!(session.observe_word("кот", t0 + WINDOW));
    }
}
