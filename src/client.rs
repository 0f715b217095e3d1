//! Core client trait and error types.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The service answered with a status other than `200 OK`.
    #[error("Received response code {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A stream line that is not a JSON object carrying a string `response`.
    ///
    /// Produced while parsing and swallowed by the aggregator.
    #[error("Malformed fragment: {0}")]
    MalformedFragment(String),

    #[error("JSON serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Echo output error: {0}")]
    Echo(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// A lazily consumed, single-pass sequence of decoded response lines.
pub type LineStream = Pin<Box<dyn Stream<Item = Result<String, ClientError>> + Send>>;

/// Capability to send a payload and stream the response back line by line.
///
/// [`crate::http::HttpApiClient`] is the HTTP-backed implementation. Tests can
/// implement it over an in-memory stream.
///
/// # Example
/// ```rust,ignore
/// struct Canned(Vec<String>);
///
/// #[async_trait]
/// impl ApiClient for Canned {
///     async fn send_request(&self, _: &str, _: &Value) -> Result<LineStream, ClientError> {
///         let lines: Vec<_> = self.0.iter().cloned().map(Ok).collect();
///         Ok(Box::pin(futures::stream::iter(lines)))
///     }
/// }
/// ```
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Send `payload` to `endpoint` and return the response body as lines.
    ///
    /// # Errors
    /// - [`ClientError::RequestFailed`] when the status is not 200
    /// - [`ClientError::Transport`] on connection-level faults
    async fn send_request(&self, endpoint: &str, payload: &Value)
        -> Result<LineStream, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_display_carries_status_and_body() {
        let err = ClientError::RequestFailed {
            status: 503,
            body: "try later".to_string(),
        };
        assert_eq!(err.to_string(), "Received response code 503: try later");
    }

    #[test]
    fn test_io_error_converts_to_echo() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: ClientError = io.into();
        assert!(matches!(err, ClientError::Echo(_)));
        assert!(err.to_string().contains("closed"));
    }
}
