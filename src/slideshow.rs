//! The `SlideShowAi` facade: one query in, one string out.

use std::io::Write;

use crate::client::{ApiClient, ClientError};
use crate::http::HttpApiClient;
use crate::model::MessageRequest;
use crate::options::TransportOptions;
use crate::stream::aggregate;

/// Default endpoint of the hosted slideshow service.
pub const API_URL: &str = "https://slideshow-5.onrender.com/process_message";

/// Client for the slideshow generation service.
///
/// # Example
/// ```no_run
/// use slideshow_ai::SlideShowAi;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let slideshow = SlideShowAi::new()?;
///     let answer = slideshow.chat("What is artificial intelligence?", true).await;
///     println!("\nSlideShowAI: {}", answer);
///     Ok(())
/// }
/// ```
pub struct SlideShowAi<C = HttpApiClient> {
    client: C,
    endpoint: String,
}

impl SlideShowAi<HttpApiClient> {
    /// Create a client for the default endpoint with default transport options.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_transport(TransportOptions::default())
    }

    /// Create a client for the default endpoint with custom transport options.
    pub fn with_transport(transport_options: TransportOptions) -> Result<Self, ClientError> {
        Ok(Self::with_client(HttpApiClient::new(transport_options)?))
    }
}

impl<C: ApiClient> SlideShowAi<C> {
    /// Wrap any [`ApiClient`] implementation.
    pub fn with_client(client: C) -> Self {
        Self {
            client,
            endpoint: API_URL.to_string(),
        }
    }

    /// Override the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send `query` and return the aggregated answer.
    ///
    /// Never fails: request errors come back as `"Error: <details>"`. With
    /// `echo` set, fragments are printed to stdout as they arrive.
    pub async fn chat(&self, query: &str, echo: bool) -> String {
        let result = if echo {
            let mut stdout = std::io::stdout();
            self.chat_with_echo(query, Some(&mut stdout)).await
        } else {
            self.chat_with_echo(query, None::<&mut std::io::Stdout>).await
        };

        result.unwrap_or_else(|e| format!("Error: {}", e))
    }

    /// Like [`chat`](Self::chat) but reports failures as a [`ClientError`].
    pub async fn try_chat(&self, query: &str, echo: bool) -> Result<String, ClientError> {
        if echo {
            let mut stdout = std::io::stdout();
            self.chat_with_echo(query, Some(&mut stdout)).await
        } else {
            self.chat_with_echo(query, None::<&mut std::io::Stdout>).await
        }
    }

    /// Send `query`, echoing fragments to `echo` when given.
    pub async fn chat_with_echo<W>(
        &self,
        query: &str,
        echo: Option<&mut W>,
    ) -> Result<String, ClientError>
    where
        W: Write + ?Sized,
    {
        let payload = serde_json::to_value(MessageRequest::new(query))?;
        let lines = self.client.send_request(&self.endpoint, &payload).await?;

        aggregate(lines, echo).await.inspect_err(|e| {
            tracing::warn!(error = %e, "response stream aborted");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LineStream;
    use async_trait::async_trait;
    use futures::stream;
    use serde_json::Value;
    use std::sync::Mutex;

    /// Replays a fixed set of lines and records every payload it receives.
    struct Canned {
        lines: Vec<String>,
        seen: Mutex<Vec<(String, Value)>>,
    }

    impl Canned {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|s| s.to_string()).collect(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ApiClient for Canned {
        async fn send_request(
            &self,
            endpoint: &str,
            payload: &Value,
        ) -> Result<LineStream, ClientError> {
            self.seen
                .lock()
                .unwrap()
                .push((endpoint.to_string(), payload.clone()));
            let lines: Vec<_> = self.lines.iter().cloned().map(Ok).collect();
            Ok(Box::pin(stream::iter(lines)))
        }
    }

    struct Rejecting;

    #[async_trait]
    impl ApiClient for Rejecting {
        async fn send_request(&self, _: &str, _: &Value) -> Result<LineStream, ClientError> {
            Err(ClientError::RequestFailed {
                status: 500,
                body: "server overloaded".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_chat_aggregates_fragments() {
        let slideshow = SlideShowAi::with_client(Canned::new(&[
            r#"{"response": "Art"}"#,
            r#"{"response": "ificial "}"#,
            r#"{"response": "Intelligence"}"#,
        ]));

        assert_eq!(slideshow.chat("q", false).await, "Artificial Intelligence");
    }

    #[tokio::test]
    async fn test_chat_sends_message_payload_to_endpoint() {
        let slideshow = SlideShowAi::with_client(Canned::new(&[])).with_endpoint("http://local/x");
        slideshow.chat("", false).await;

        let seen = slideshow.client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "http://local/x");
        assert_eq!(seen[0].1, serde_json::json!({ "message": "" }));
    }

    #[tokio::test]
    async fn test_chat_is_repeatable() {
        let slideshow = SlideShowAi::with_client(Canned::new(&[
            r#"{"response": "same"}"#,
            "oops",
            r#"{"response": " answer"}"#,
        ]));

        let first = slideshow.chat("q", false).await;
        let second = slideshow.chat("q", false).await;
        assert_eq!(first, "same answer");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_chat_degrades_to_error_string() {
        let slideshow = SlideShowAi::with_client(Rejecting);
        let out = slideshow.chat("q", false).await;

        assert!(out.starts_with("Error: "));
        assert!(out.contains("500"));
        assert!(out.contains("server overloaded"));
    }

    #[tokio::test]
    async fn test_try_chat_surfaces_error_variant() {
        let slideshow = SlideShowAi::with_client(Rejecting);
        let err = slideshow.try_chat("q", false).await.unwrap_err();
        assert!(matches!(err, ClientError::RequestFailed { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_chat_with_echo_writes_fragments() {
        let slideshow = SlideShowAi::with_client(Canned::new(&[
            r#"{"response": "Hello\n"}"#,
            r#"{"response": "  World  "}"#,
        ]));
        let mut echoed = Vec::new();

        let out = slideshow
            .chat_with_echo("q", Some(&mut echoed))
            .await
            .unwrap();

        assert_eq!(out, "Hello  World");
        assert_eq!(String::from_utf8(echoed).unwrap(), "Hello\n  World  ");
    }

    #[test]
    fn test_default_endpoint() {
        let slideshow = SlideShowAi::new().unwrap();
        assert_eq!(slideshow.endpoint(), API_URL);
    }
}
