//! Wire data models for the slideshow service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::ClientError;

/// Request body sent to the service: `{"message": "<user text>"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageRequest {
    /// The user's query, passed through unchanged (empty is allowed)
    pub message: String,
}

impl MessageRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Field carrying the incremental text in each streamed line.
pub const RESPONSE_FIELD: &str = "response";

/// Parse one stream line into its fragment text.
///
/// The line must be a JSON object. A missing `response` key yields an empty
/// fragment; a `response` that is not a string is rejected.
///
/// # Example
/// ```
/// use slideshow_ai::model::parse_fragment;
///
/// assert_eq!(parse_fragment(r#"{"response": "Art"}"#).unwrap(), "Art");
/// assert_eq!(parse_fragment(r#"{"done": true}"#).unwrap(), "");
/// assert!(parse_fragment("not-json").is_err());
/// ```
pub fn parse_fragment(line: &str) -> Result<String, ClientError> {
    let object: Map<String, Value> = serde_json::from_str(line)
        .map_err(|e| ClientError::MalformedFragment(e.to_string()))?;

    match object.get(RESPONSE_FIELD) {
        None => Ok(String::new()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(ClientError::MalformedFragment(format!(
            "`{}` is not a string: {}",
            RESPONSE_FIELD, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_request_wire_shape() {
        let body = serde_json::to_value(MessageRequest::new("What is AI?")).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "What is AI?" }));
    }

    #[test]
    fn test_empty_query_passes_through() {
        let body = serde_json::to_string(&MessageRequest::new("")).unwrap();
        assert_eq!(body, r#"{"message":""}"#);
    }

    #[test]
    fn test_parse_fragment_reads_response() {
        assert_eq!(
            parse_fragment(r#"{"response": "ificial ", "id": 3}"#).unwrap(),
            "ificial "
        );
    }

    #[test]
    fn test_parse_fragment_missing_field_is_empty() {
        assert_eq!(parse_fragment("{}").unwrap(), "");
    }

    #[test]
    fn test_parse_fragment_rejects_non_objects() {
        for line in ["not-json", "[\"response\"]", "\"text\"", "42", "{\"response\":"] {
            assert!(
                matches!(parse_fragment(line), Err(ClientError::MalformedFragment(_))),
                "expected malformed for {line}"
            );
        }
    }

    #[test]
    fn test_parse_fragment_rejects_non_string_response() {
        assert!(parse_fragment(r#"{"response": 5}"#).is_err());
        assert!(parse_fragment(r#"{"response": null}"#).is_err());
    }
}
