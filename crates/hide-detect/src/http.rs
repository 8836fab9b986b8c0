//! Status-code checks shared by HTTP detectors.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::error::DetectError;

/// Turn an error status into a [`DetectError`].
///
/// Success passes the response through. A 429 becomes
/// [`DetectError::RateLimited`]; any other failure becomes [`DetectError::Api`]
/// carrying the trimmed body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, DetectError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(DetectError::RateLimited {
            retry_after_secs: retry_after(resp.headers()),
        });
    }
    let body = resp.text().await.unwrap_or_default();
    Err(DetectError::Api {
        status: status.as_u16(),
        message: body.trim().to_string(),
    })
}

/// Delay-seconds form of `Retry-After`. HTTP-date values are ignored.
fn retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, retry_after: Option<&str>, body: &'static str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body(body).unwrap())
    }

    #[test]
    fn retry_after_header_is_read() {
        assert_eq!(retry_after(response(429, Some("15"), "").headers()), Some(15));
        assert_eq!(retry_after(response(429, Some(" 7 "), "").headers()), Some(7));
        assert_eq!(
            retry_after(response(429, Some("Wed, 21 Oct 2026 07:28:00 GMT"), "").headers()),
            None
        );
        assert_eq!(retry_after(response(429, None, "").headers()), None);
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let err = check_response(response(429, Some("5"), "")).await.unwrap_err();
        assert!(matches!(err, DetectError::RateLimited { retry_after_secs: Some(5) }));
        assert_eq!(err.to_string(), "rate limited, retry after 5s");
    }

    #[tokio::test]
    async fn server_error_keeps_body() {
        let err = check_response(response(503, None, "model overloaded\n"))
            .await
            .unwrap_err();
        match err {
            DetectError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "model overloaded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = check_response(response(200, None, "{}")).await.unwrap();
        assert_eq!(resp.status(), 200);
    }
}
