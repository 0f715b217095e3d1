//! Stream aggregation: turning response lines into one answer.

use std::io::Write;

use futures::stream::{Stream, StreamExt};

use crate::client::ClientError;
use crate::model::parse_fragment;

/// Lazily map response lines to fragment texts.
///
/// Lines that fail to parse are dropped here without a trace. Transport
/// errors from the underlying line stream are passed through.
pub fn fragments<S>(lines: S) -> impl Stream<Item = Result<String, ClientError>> + Send
where
    S: Stream<Item = Result<String, ClientError>> + Send,
{
    lines.filter_map(|line| async move {
        match line {
            Ok(line) => parse_fragment(&line).ok().map(Ok),
            Err(e) => Some(Err(e)),
        }
    })
}

/// Consume a line stream to completion and return the finalized text.
///
/// When `echo` is set every fragment is written to it as soon as it is
/// parsed, without a line break, and flushed. A failed write or flush ends
/// the aggregation with [`ClientError::Echo`].
pub async fn aggregate<S, W>(lines: S, mut echo: Option<&mut W>) -> Result<String, ClientError>
where
    S: Stream<Item = Result<String, ClientError>> + Send,
    W: Write + ?Sized,
{
    let fragments = fragments(lines);
    futures::pin_mut!(fragments);

    let mut complete = String::new();
    let mut count = 0usize;

    while let Some(fragment) = fragments.next().await {
        let fragment = fragment?;

        if let Some(out) = echo.as_deref_mut() {
            out.write_all(fragment.as_bytes())?;
            out.flush()?;
        }

        complete.push_str(&fragment);
        count += 1;
    }

    tracing::debug!(fragments = count, bytes = complete.len(), "stream complete");
    Ok(finalize(&complete))
}

/// Trim surrounding whitespace, then drop every newline character.
///
/// Interior spaces survive; only the ends of the whole text are trimmed.
///
/// # Example
/// ```
/// use slideshow_ai::stream::finalize;
///
/// assert_eq!(finalize("Hello\n  World  "), "Hello  World");
/// ```
pub fn finalize(text: &str) -> String {
    text.trim().replace('\n', "")
}
