//! Error types for the proxy server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use eas_feed::FeedError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the HTTP server itself.
///
/// Pipeline failures never appear here; they are recovered inside the
/// refresh scheduler and are invisible to HTTP clients.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(std::net::SocketAddr, std::io::Error),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A single failed refresh cycle.
///
/// Every variant is recovered locally by the scheduler: logged, cycle
/// abandoned, previous cache state left untouched.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The upstream feed was unreachable or timed out.
    #[error("feed fetch failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream feed returned an empty or whitespace-only body.
    #[error("feed returned an empty body")]
    EmptyBody,

    /// Decoding or normalizing the payload failed.
    #[error(transparent)]
    Feed(#[from] FeedError),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: "internal_error".to_string(),
            message: self.to_string(),
        };

        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            r#"{"error":"internal_error","message":"failed to serialize error"}"#.to_string()
        });

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "application/json")],
            json,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_refresh_error_from_feed_error() {
        let err = RefreshError::from(FeedError::NoAlerts);
        assert!(matches!(err, RefreshError::Feed(FeedError::NoAlerts)));
        assert_eq!(err.to_string(), "feed contains no alerts.alert element");
    }

    #[test]
    fn test_empty_body_display() {
        assert_eq!(
            RefreshError::EmptyBody.to_string(),
            "feed returned an empty body"
        );
    }

    #[tokio::test]
    async fn test_internal_error_response() {
        let err = ServerError::Internal("something broke".to_string());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body();
        let bytes = body.collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"], "internal_error");
        assert!(json["message"].as_str().unwrap().contains("something broke"));
    }
}
