//! Retry behaviour against a scripted detector.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use hide_core::ReferenceSheet;
use hide_detect::{
    DetectError, Detection, DetectionRequest, Detector, RetryPolicy, detect_with_retry, measure,
};
use pretty_assertions::assert_eq;

/// Replays a fixed sequence of outcomes, one per call.
struct Scripted {
    script: Mutex<VecDeque<Result<Detection, DetectError>>>,
    calls: AtomicU32,
}

impl Scripted {
    fn new(script: impl IntoIterator<Item = Result<Detection, DetectError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Detector for Scripted {
    async fn detect(&self, _request: &DetectionRequest) -> Result<Detection, DetectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(DetectError::Parse("script exhausted".into())))
    }
}

fn overloaded() -> DetectError {
    DetectError::Api {
        status: 503,
        message: "overloaded".into(),
    }
}

fn square_detection() -> Detection {
    Detection {
        detected_reference: true,
        detected_target: true,
        area_m2: 9.0,
        explanation: "found".into(),
        confidence: 92.0,
        vertices_flat: vec![200.0, 200.0, 350.0, 200.0, 350.0, 350.0, 200.0, 350.0],
        reference_outline: "M 100 100 L 400 100 L 400 400 L 100 400 Z".into(),
    }
}

#[tokio::test]
async fn succeeds_after_transient_failures() {
    let detector = Scripted::new([Err(overloaded()), Err(overloaded()), Ok(square_detection())]);
    let detection = detect_with_retry(&detector, &DetectionRequest::new("img"), &RetryPolicy::immediate(3))
        .await
        .unwrap();
    assert_eq!(detection, square_detection());
    assert_eq!(detector.calls(), 3);
}

#[tokio::test]
async fn exhaustion_reports_attempts_and_last_cause() {
    let detector = Scripted::new([
        Err(overloaded()),
        Err(DetectError::RateLimited { retry_after_secs: None }),
        Err(DetectError::Parse("truncated JSON".into())),
        Ok(square_detection()),
    ]);
    let err = detect_with_retry(&detector, &DetectionRequest::new("img"), &RetryPolicy::immediate(3))
        .await
        .unwrap_err();

    assert_eq!(detector.calls(), 3);
    match err {
        DetectError::Exhausted { attempts, last } => {
            assert_eq!(attempts, 3);
            assert!(matches!(*last, DetectError::Parse(ref m) if m == "truncated JSON"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn configuration_errors_are_not_retried() {
    let detector = Scripted::new([
        Err(DetectError::NotConfigured("detector.api_key is not set".into())),
        Ok(square_detection()),
    ]);
    let err = detect_with_retry(&detector, &DetectionRequest::new("img"), &RetryPolicy::immediate(3))
        .await
        .unwrap_err();
    assert!(matches!(err, DetectError::NotConfigured(_)));
    assert_eq!(detector.calls(), 1);
}

#[tokio::test]
async fn backoff_separates_attempts_but_not_the_last() {
    let detector = Scripted::new([Err(overloaded()), Err(overloaded())]);
    let policy = RetryPolicy {
        max_attempts: 2,
        backoff: Duration::from_millis(20),
    };
    let started = std::time::Instant::now();
    let err = detect_with_retry(&detector, &DetectionRequest::new("img"), &policy)
        .await
        .unwrap_err();
    assert!(started.elapsed() >= Duration::from_millis(20));
    assert!(matches!(err, DetectError::Exhausted { attempts: 2, .. }));
}

#[tokio::test]
async fn measure_calibrates_against_the_sheet() {
    let detector = Scripted::new([Ok(square_detection())]);
    let result = measure(
        &detector,
        &DetectionRequest::new("img"),
        &RetryPolicy::default(),
        ReferenceSheet::A4,
    )
    .await
    .unwrap();
    assert!((result.area_m2 - 0.015_592_5).abs() < 1e-12);
    assert_eq!(result.confidence, 92);
    assert_eq!(result.target.len(), 4);
}
