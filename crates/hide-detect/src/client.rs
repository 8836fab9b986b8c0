//! The detector boundary and its HTTP implementation.

use std::future::Future;

use hide_config::DetectorConfig;
use hide_core::LearningReference;
use serde::Serialize;
use tracing::debug;

use crate::error::DetectError;
use crate::http::check_response;
use crate::payload::strip_data_url;
use crate::response::{Detection, decode_detection};

/// Points the service is asked to trace along the hide boundary.
pub const TRACE_POINTS: u32 = 100;

const INSTRUCTIONS: &str = "\
Segment the raw hide lying on the floor and locate the reference sheet of paper.
1. Find the bounding box around the hide and ignore the floor outside it.
2. Trace exactly 100 points along the hide boundary. The hide is textured; the \
floor is smooth. Ignore cast shadows: the edge is where the hide material ends.
3. Outline the reference sheet as a 4-point path (\"M x y L x y L x y L x y Z\").
All coordinates use a 1000x1000 grid over the image.
Reply with a JSON object: detectedA4, detectedLeather, estimatedAreaSqM, \
explanation, confidenceScore (0-100), leatherVerticesFlat ([x1, y1, x2, y2, ...]), \
a4Outline.";

const EXAMPLE_NOTE: &str = "Operator-corrected trace of a previous hide. Use it \
as an example of where the true boundary lies.";

/// What the detector is asked to measure.
#[derive(Debug, Clone, Default)]
pub struct DetectionRequest {
    /// Prepared JPEG, base64-encoded without a data-URL header.
    pub image_base64: String,
    /// Operator-corrected example from an earlier measurement.
    pub learning: Option<LearningReference>,
}

impl DetectionRequest {
    /// A request for `image_base64`. A `data:image/...;base64,` header is dropped.
    #[must_use]
    pub fn new(image_base64: impl Into<String>) -> Self {
        let image_base64 = image_base64.into();
        Self {
            image_base64: strip_data_url(&image_base64).to_string(),
            learning: None,
        }
    }

    #[must_use]
    pub fn with_learning(mut self, learning: Option<LearningReference>) -> Self {
        self.learning = learning;
        self
    }
}

/// Injected detection collaborator.
pub trait Detector {
    /// Run one detection attempt.
    ///
    /// Retrying is the caller's concern; see [`crate::detect_with_retry`].
    fn detect(
        &self,
        request: &DetectionRequest,
    ) -> impl Future<Output = Result<Detection, DetectError>> + Send;
}

#[derive(Serialize)]
struct ImagePart<'a> {
    mime_type: &'static str,
    data: &'a str,
}

impl<'a> ImagePart<'a> {
    const fn jpeg(data: &'a str) -> Self {
        Self {
            mime_type: "image/jpeg",
            data,
        }
    }
}

#[derive(Serialize)]
struct ExamplePart<'a> {
    note: &'static str,
    image: ImagePart<'a>,
    vertices_flat: Vec<f64>,
}

#[derive(Serialize)]
struct RequestBody<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    model: &'a str,
    temperature: f32,
    instructions: &'static str,
    trace_points: u32,
    image: ImagePart<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    example: Option<ExamplePart<'a>>,
}

impl<'a> RequestBody<'a> {
    fn new(model: &'a str, temperature: f32, request: &'a DetectionRequest) -> Self {
        Self {
            model,
            temperature,
            instructions: INSTRUCTIONS,
            trace_points: TRACE_POINTS,
            image: ImagePart::jpeg(&request.image_base64),
            example: request.learning.as_ref().map(|learning| ExamplePart {
                note: EXAMPLE_NOTE,
                image: ImagePart::jpeg(strip_data_url(&learning.thumbnail)),
                vertices_flat: learning.target.to_flat(),
            }),
        }
    }
}

/// Detector that POSTs to a JSON segmentation endpoint.
#[derive(Debug, Clone)]
pub struct HttpDetector {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl HttpDetector {
    /// Build a detector from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::NotConfigured`] if the endpoint or API key is
    /// empty, or [`DetectError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &DetectorConfig) -> Result<Self, DetectError> {
        if config.endpoint.is_empty() {
            return Err(DetectError::NotConfigured("detector.endpoint is not set".into()));
        }
        if config.api_key.is_empty() {
            return Err(DetectError::NotConfigured("detector.api_key is not set".into()));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("hidemeter/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Detector for HttpDetector {
    async fn detect(&self, request: &DetectionRequest) -> Result<Detection, DetectError> {
        let body = RequestBody::new(&self.model, self.temperature, request);
        debug!(
            endpoint = %self.endpoint,
            with_example = body.example.is_some(),
            "sending detection request"
        );

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let text = check_response(resp).await?.text().await?;
        decode_detection(&text)
    }
}

#[cfg(test)]
mod tests {
    use hide_core::Polygon;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn configured() -> DetectorConfig {
        DetectorConfig {
            endpoint: "https://segment.example.test/v1/measure".into(),
            api_key: "secret".into(),
            ..DetectorConfig::default()
        }
    }

    #[test]
    fn missing_key_is_not_configured() {
        let config = DetectorConfig {
            api_key: String::new(),
            ..configured()
        };
        let err = HttpDetector::from_config(&config).unwrap_err();
        assert!(matches!(err, DetectError::NotConfigured(ref m) if m.contains("api_key")));
    }

    #[test]
    fn missing_endpoint_is_not_configured() {
        let err = HttpDetector::from_config(&DetectorConfig::default()).unwrap_err();
        assert!(matches!(err, DetectError::NotConfigured(ref m) if m.contains("endpoint")));
    }

    #[test]
    fn configured_detector_builds() {
        let detector = HttpDetector::from_config(&configured()).unwrap();
        assert_eq!(detector.endpoint(), "https://segment.example.test/v1/measure");
    }

    #[test]
    fn body_without_learning_omits_example_and_empty_model() {
        let request = DetectionRequest::new("aGlkZQ==");
        let value = serde_json::to_value(RequestBody::new("", 0.1, &request)).unwrap();
        assert!(value.get("model").is_none());
        assert!(value.get("example").is_none());
        assert_eq!(value["image"], json!({"mime_type": "image/jpeg", "data": "aGlkZQ=="}));
        assert_eq!(value["trace_points"], json!(100));
    }

    #[test]
    fn data_url_headers_are_not_sent() {
        let flat: Vec<f64> = (0..11u32).flat_map(|i| [f64::from(i) * 10.0, 50.0]).collect();
        let learning =
            LearningReference::new("data:image/jpeg;base64,dGh1bWI=", Polygon::from_flat(&flat))
                .unwrap();
        let request =
            DetectionRequest::new("data:image/jpeg;base64,/9j/").with_learning(Some(learning));
        assert_eq!(request.image_base64, "/9j/");

        let value = serde_json::to_value(RequestBody::new("", 0.1, &request)).unwrap();
        assert_eq!(value["image"]["data"], json!("/9j/"));
        assert_eq!(value["example"]["image"]["data"], json!("dGh1bWI="));
    }

    #[test]
    fn body_with_learning_carries_flat_vertices() {
        let flat: Vec<f64> = (0..11u32).flat_map(|i| [f64::from(i) * 10.0, 50.0]).collect();
        let learning = LearningReference::new("dGh1bWI=", Polygon::from_flat(&flat)).unwrap();
        let request = DetectionRequest::new("aGlkZQ==").with_learning(Some(learning));
        let value = serde_json::to_value(RequestBody::new("seg-large", 0.1, &request)).unwrap();
        assert_eq!(value["model"], json!("seg-large"));
        assert_eq!(value["example"]["image"]["data"], json!("dGh1bWI="));
        assert_eq!(value["example"]["vertices_flat"].as_array().unwrap().len(), 22);
    }
}
