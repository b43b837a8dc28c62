/// Screen-text recognition collaborator.
///
/// The optical engine itself lives outside this crate; the hover pipeline
/// only needs "text found in a square around a screen point".
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::FutureExt;
use futures::future::BoxFuture;
use thiserror::Error;

use crate::hover::Point;

#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("recognition engine not initialized")]
    Unavailable,

    #[error("failed to capture screen area: {0}")]
    Capture(String),

    #[error("recognition failed: {0}")]
    Recognition(String),
}

/// Reads text from the screen around `center`.
pub trait TextRecognizer: Send + Sync {
    fn recognize_text(
        &self,
        center: Point,
        radius: u32,
    ) -> BoxFuture<'_, Result<String, RecognitionError>>;
}

/// Recognizer for setups without an optical engine; always unavailable.
pub struct NoRecognizer;

impl TextRecognizer for NoRecognizer {
    fn recognize_text(
        &self,
        _center: Point,
        _radius: u32,
    ) -> BoxFuture<'_, Result<String, RecognitionError>> {
        async { Err(RecognitionError::Unavailable) }.boxed()
    }
}

/// Recognizer returning canned text, keyed by exact screen point.
///
/// Points without an entry yield the fallback text. Points registered with
/// [`StaticRecognizer::unreadable_at`] fail to capture, and a recognizer
/// built with [`StaticRecognizer::failing`] fails everywhere else.
#[derive(Default)]
pub struct StaticRecognizer {
    fallback: String,
    by_point: HashMap<Point, String>,
    unreadable: HashSet<Point>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl StaticRecognizer {
    pub fn new(fallback: &str) -> Self {
        Self {
            fallback: fallback.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn at(mut self, point: Point, text: &str) -> Self {
        self.by_point.insert(point, text.to_string());
        self
    }

    /// Recognition fails with `message` at points without canned text.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Capturing the area around `point` fails.
    #[must_use]
    pub fn unreadable_at(mut self, point: Point) -> Self {
        self.unreadable.insert(point);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl TextRecognizer for StaticRecognizer {
    fn recognize_text(
        &self,
        center: Point,
        _radius: u32,
    ) -> BoxFuture<'_, Result<String, RecognitionError>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let result = if self.unreadable.contains(&center) {
            Err(RecognitionError::Capture(format!(
                "no pixels around ({}, {})",
                center.x, center.y
            )))
        } else if let Some(text) = self.by_point.get(&center) {
            Ok(text.clone())
        } else if let Some(message) = &self.failure {
            Err(RecognitionError::Recognition(message.clone()))
        } else {
            Ok(self.fallback.clone())
        };
        async move { result }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_recognizer() {
        let rec = StaticRecognizer::new("фон").at(Point::new(10, 10), "кот");
        assert_eq!(rec.recognize_text(Point::new(10, 10), 100).await.unwrap(), "кот");
        assert_eq!(rec.recognize_text(Point::new(0, 0), 100).await.unwrap(), "фон");
        assert_eq!(rec.calls(), 2);
    }

    #[tokio::test]
    async fn test_static_recognizer_failures() {
        let rec = StaticRecognizer::failing("engine crashed")
            .at(Point::new(1, 1), "кот")
            .unreadable_at(Point::new(2, 2));

        assert_eq!(rec.recognize_text(Point::new(1, 1), 100).await.unwrap(), "кот");
        let err = rec.recognize_text(Point::new(2, 2), 100).await.unwrap_err();
        assert!(matches!(err, RecognitionError::Capture(_)), "got {err:?}");
        let err = rec.recognize_text(Point::new(3, 3), 100).await.unwrap_err();
        assert!(
            matches!(err, RecognitionError::Recognition(ref m) if m == "engine crashed"),
            "got {err:?}"
        );
        assert_eq!(rec.calls(), 3);
    }

    #[tokio::test]
    async fn test_no_recognizer_is_unavailable() {
        let err = NoRecognizer.recognize_text(Point::new(0, 0), 50).await.unwrap_err();
        assert!(matches!(err, RecognitionError::Unavailable));
    }
}
