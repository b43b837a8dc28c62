/// Hand-off from a pointer-capture thread to a resolver.
///
/// Capture hooks run on their own blocking thread and must never stall.
/// Positions are posted with `try_send`; when the resolver's queue is full
/// the position is dropped, which is harmless since a later one supersedes
/// it.
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, trace};

use super::{HoverEvent, Point};

/// A blocking source of screen pointer positions.
pub trait PointerSource: Send + 'static {
    /// Block until the next position; `None` ends the capture.
    fn next_position(&mut self) -> Option<Point>;
}

/// Replays a fixed list of positions, optionally paced.
#[derive(Debug, Default)]
pub struct ReplaySource {
    positions: VecDeque<Point>,
    interval: Option<Duration>,
}

impl ReplaySource {
    pub fn new(positions: impl IntoIterator<Item = Point>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
            interval: None,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }
}

impl PointerSource for ReplaySource {
    fn next_position(&mut self) -> Option<Point> {
        let next = self.positions.pop_front()?;
        if let Some(interval) = self.interval {
            thread::sleep(interval);
        }
        Some(next)
    }
}

/// Sending half used by capture threads.
#[derive(Clone)]
pub struct CaptureBridge {
    tx: mpsc::Sender<HoverEvent>,
    dropped: Arc<AtomicU64>,
}

impl CaptureBridge {
    pub fn new(tx: mpsc::Sender<HoverEvent>) -> Self {
        Self {
            tx,
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Post a position without blocking. Returns `false` once the resolver
    /// is gone.
    pub fn post_move(&self, position: Point) -> bool {
        match self.tx.try_send(HoverEvent::ScreenMotion(position)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                trace!("Event queue full, dropped {position:?}");
                true
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Positions discarded because the queue was full.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Run `source` on a dedicated thread, posting every position through
/// `bridge` until the source ends or the resolver goes away.
pub fn spawn_capture<S: PointerSource>(
    mut source: S,
    bridge: CaptureBridge,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("pointer-capture".to_string())
        .spawn(move || {
            let mut posted = 0u64;
            while let Some(position) = source.next_position() {
                if !bridge.post_move(position) {
                    debug!("Resolver closed, stopping pointer capture");
                    break;
                }
                posted += 1;
            }
            debug!(
                "Pointer capture finished: {posted} posted, {} dropped",
                bridge.dropped()
            );
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_queue_drops_without_blocking() {
        let (tx, mut rx) = mpsc::channel(2);
        let bridge = CaptureBridge::new(tx);

        for x in 0..5 {
            assert!(bridge.post_move(Point::new(x, 0)));
        }
        assert_eq!(bridge.dropped(), 3);
        assert_eq!(
            rx.try_recv().unwrap(),
            HoverEvent::ScreenMotion(Point::new(0, 0))
        );
    }

    #[test]
    fn test_closed_queue_reports_false() {
        let (tx, rx) = mpsc::channel(4);
        drop(rx);
        let bridge = CaptureBridge::new(tx);
        assert!(!bridge.post_move(Point::new(1, 1)));
        assert_eq!(bridge.dropped(), 0);
    }

    #[test]
    fn test_capture_thread_replays_positions() {
        let (tx, mut rx) = mpsc::channel(16);
        let source = ReplaySource::new([Point::new(1, 2), Point::new(3, 4)]);
        let handle = spawn_capture(source, CaptureBridge::new(tx)).unwrap();
        handle.join().unwrap();

        let mut seen = Vec::new();
        while let Ok(HoverEvent::ScreenMotion(p)) = rx.try_recv() {
            seen.push(p);
        }
        assert_eq!(seen, vec![Point::new(1, 2), Point::new(3, 4)]);
    }
}
