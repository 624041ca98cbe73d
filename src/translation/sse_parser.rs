//! Server-Sent Events (SSE) parsing for streaming chat completion APIs.
//!
//! [`sse_lines`] turns a raw byte stream into complete text lines;
//! [`sse_to_text_stream`] interprets those lines as OpenAI-style
//! `chat.completion.chunk` events.

use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

use super::error::StreamError;
use super::provider::Fragment;

const DATA_PREFIX: &str = "data: ";
const DONE_MARKER: &str = "[DONE]";

/// Response structure for streaming chat completions.
#[derive(Debug, Deserialize)]
struct StreamResponse {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

/// Splits a byte stream into lines, without the trailing `\n` / `\r\n`.
///
/// Bytes are buffered until a full line is available, so multi-byte UTF-8
/// characters split across network chunks decode correctly. A transport
/// error is yielded once and ends the stream. A final line without a
/// newline is flushed at end of input.
pub fn sse_lines<S, E>(byte_stream: S) -> impl Stream<Item = Result<String, StreamError>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<StreamError> + Send + 'static,
{
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    let err: StreamError = e.into();
                    yield Err(err);
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=line_end).collect();
                yield Ok(decode_line(&line));
            }
        }

        if !buffer.is_empty() {
            yield Ok(decode_line(&buffer));
        }
    }
}

fn decode_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_end_matches(['\n', '\r'])
        .to_string()
}

/// Converts a raw SSE byte stream into a stream of text fragments.
///
/// Lines without the `data: ` prefix are ignored, `data: [DONE]` ends the
/// stream, and payloads that are not valid chunk JSON are skipped.
pub fn sse_to_text_stream<S, E>(byte_stream: S) -> impl Stream<Item = Fragment> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<StreamError> + Send + 'static,
{
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut lines = std::pin::pin!(sse_lines(byte_stream));

        while let Some(line_result) = lines.next().await {
            let line = match line_result {
                Ok(line) => line,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };
            let line = line.trim();

            if line.strip_prefix(DATA_PREFIX) == Some(DONE_MARKER) {
                tracing::debug!("received [DONE]");
                return;
            }

            if let Some(content) = parse_sse_line(line) {
                yield Ok(content);
            } else if line.starts_with(DATA_PREFIX) {
                tracing::trace!(line, "skipping data line without content");
            }
        }
    }
}

/// Parses a single SSE line and extracts the text content.
///
/// # Returns
///
/// * `Some(content)` - The concatenated non-empty delta contents
/// * `None` - For non-data lines, empty content, or parse errors
fn parse_sse_line(line: &str) -> Option<String> {
    let json_str = line.strip_prefix(DATA_PREFIX)?;

    let response = serde_json::from_str::<StreamResponse>(json_str).ok()?;

    let content: String = response
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .filter(|c| !c.is_empty())
        .collect();

    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}
