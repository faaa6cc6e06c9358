//! Shared HTTP response helpers for source clients.

use crate::error::SourceError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. A 429 becomes
/// [`SourceError::RateLimited`] using the `Retry-After` header (60 s when
/// absent or unparseable); any other non-success status becomes
/// [`SourceError::Api`] carrying the body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    if resp.status() == 429 {
        return Err(SourceError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let message = resp.text().await.unwrap_or_default();
        tracing::debug!(status, "source returned an error status");
        return Err(SourceError::Api { status, message });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(60)
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
    fn retry_after_is_read_from_header() {
        assert_eq!(parse_retry_after(&response(429, Some("120"), "")), 120);
    }

    #[test]
    fn retry_after_defaults_when_missing_or_garbled() {
        assert_eq!(parse_retry_after(&response(429, None, "")), 60);
        assert_eq!(parse_retry_after(&response(429, Some("soon"), "")), 60);
    }

    #[tokio::test]
    async fn rate_limited_status_is_mapped() {
        let err = check_response(response(429, Some("30"), "")).await.unwrap_err();
        assert!(matches!(
            err,
            SourceError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn server_error_keeps_body() {
        let err = check_response(response(502, None, "bad gateway")).await.unwrap_err();
        match err {
            SourceError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(response(200, None, "ok")).await.is_ok());
    }
}
