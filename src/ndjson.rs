//! Newline-delimited JSON (NDJSON) line splitting.
//!
//! The service answers with one JSON object per line:
//! ```text
//! {"response": "Art"}
//! {"response": "ificial "}
//! {"response": "Intelligence"}
//! ```
//!
//! This module only cuts the body into lines; interpreting each line is the
//! job of [`crate::model::parse_fragment`].

use bytes::{Buf, Bytes, BytesMut};
use futures::stream::{self, Stream, StreamExt};

use crate::client::ClientError;

/// Extension trait for `reqwest::Response` to read the body as NDJSON lines.
///
/// # Example
/// ```ignore
/// use slideshow_ai::ndjson::NdjsonResponseExt;
///
/// let response = client.post(url).json(&payload).send().await?;
/// let mut lines = response.ndjson_lines();
/// while let Some(line) = lines.next().await {
///     println!("line: {}", line?);
/// }
/// ```
pub trait NdjsonResponseExt {
    /// Convert the response into a stream of non-empty, trimmed lines.
    fn ndjson_lines(self) -> impl Stream<Item = Result<String, ClientError>> + Send;
}

impl NdjsonResponseExt for reqwest::Response {
    fn ndjson_lines(self) -> impl Stream<Item = Result<String, ClientError>> + Send {
        lines(self.bytes_stream())
    }
}

/// Split a stream of byte chunks into lines.
///
/// Lines end at `\n`, `\r\n` or a bare `\r`. Each line is trimmed and blank
/// lines are dropped. Bytes are buffered until a terminator arrives, so a
/// multi-byte UTF-8 character split across chunks still decodes; invalid
/// UTF-8 is replaced lossily. A trailing line without terminator is emitted
/// when the byte stream ends. A transport error is yielded once and ends
/// the stream.
pub fn lines<S, E>(byte_stream: S) -> impl Stream<Item = Result<String, ClientError>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<ClientError> + Send + 'static,
{
    stream::unfold(
        (Box::pin(byte_stream), BytesMut::new(), false),
        |(mut byte_stream, mut buffer, mut finished)| async move {
            loop {
                if finished {
                    return None;
                }

                // Emit the next complete line already sitting in the buffer
                while let Some(pos) = buffer.iter().position(|b| *b == b'\n' || *b == b'\r') {
                    let raw = buffer.split_to(pos);
                    buffer.advance(1);

                    if let Some(line) = decode_line(&raw) {
                        return Some((Ok(line), (byte_stream, buffer, finished)));
                    }
                }

                match byte_stream.next().await {
                    Some(Ok(chunk)) => buffer.extend_from_slice(&chunk),
                    Some(Err(e)) => {
                        finished = true;
                        return Some((Err(e.into()), (byte_stream, buffer, finished)));
                    }
                    None => {
                        finished = true;
                        let rest = buffer.split();
                        if let Some(line) = decode_line(&rest) {
                            return Some((Ok(line), (byte_stream, buffer, finished)));
                        }
                    }
                }
            }
        },
    )
}

/// Decode one raw line, returning `None` when it is blank.
fn decode_line(raw: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(raw);
    let line = text.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
