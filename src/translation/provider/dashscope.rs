//! DashScope native text-generation API (Qwen models).
//!
//! With `X-DashScope-SSE: enable` the service answers with SSE events such as
//!
//! ```text
//! id:1
//! event:result
//! :HTTP_STATUS/200
//! data:{"output":{"choices":[{"message":{"content":"Hel","role":"assistant"}}]}}
//! ```
//!
//! Unlike OpenAI, each event carries the whole answer so far, so the adapter
//! keeps the previous content and emits only the new suffix.

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ChatMessage, Fragment, FragmentStream, TEMPERATURE, chat_messages};
use crate::translation::error::StreamError;
use crate::translation::prompt::Prompt;
use crate::translation::sse_parser::sse_lines;

pub const DEFAULT_BASE_URL: &str = "https://dashscope.aliyuncs.com/api/v1";
const GENERATION_PATH: &str = "/services/aigc/text-generation/generation";
const STATUS_PREFIX: &str = ":HTTP_STATUS/";
const SUCCESS_STATUS: u16 = 200;

#[derive(Debug, Serialize)]
struct GenerationRequest {
    model: String,
    input: GenerationInput,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationInput {
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    result_format: &'static str,
    incremental_output: bool,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    output: Option<GenerationOutput>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerationOutput {
    #[serde(default)]
    choices: Vec<GenerationChoice>,
}

#[derive(Debug, Deserialize)]
struct GenerationChoice {
    message: GenerationMessage,
}

#[derive(Debug, Deserialize)]
struct GenerationMessage {
    #[serde(default)]
    content: String,
}

impl GenerationResponse {
    fn content(&self) -> Option<&str> {
        self.output
            .as_ref()?
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
    }

    fn error_text(&self) -> String {
        match (self.code.as_deref(), self.message.as_deref()) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (None, Some(message)) => message.to_string(),
            (Some(code), None) => code.to_string(),
            (None, None) => "unknown error".to_string(),
        }
    }
}

/// Streams generations from DashScope.
///
/// The credential lives on the adapter and is sent per request, so
/// adapters with different keys can run concurrently.
#[derive(Debug, Clone)]
pub struct DashScopeAdapter {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl DashScopeAdapter {
    pub const fn new(client: Client, base_url: String, api_key: String, model: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            model,
        }
    }

    pub fn stream(&self, prompt: &Prompt) -> FragmentStream {
        let url = format!("{}{GENERATION_PATH}", self.base_url);
        let body = GenerationRequest {
            model: self.model.clone(),
            input: GenerationInput {
                messages: chat_messages(prompt),
            },
            parameters: GenerationParameters {
                result_format: "message",
                incremental_output: false,
                temperature: TEMPERATURE,
            },
        };
        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("X-DashScope-SSE", "enable")
            .header("Accept", "text/event-stream")
            .json(&body);

        Box::pin(async_stream::stream! {
            tracing::debug!(%url, "opening DashScope stream");

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    yield Err(StreamError::from(e));
                    return;
                }
            };

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                yield Err(StreamError::from_status(status.as_u16(), rejection_message(&body)));
                return;
            }

            let mut fragments =
                std::pin::pin!(dashscope_sse_to_text_stream(response.bytes_stream()));
            while let Some(fragment) = fragments.next().await {
                yield fragment;
            }
        })
    }
}

/// Tracks cumulative content and returns only what is new.
#[derive(Debug, Default)]
pub struct CumulativeText {
    seen: String,
}

impl CumulativeText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the part of `current` not yet emitted, if any.
    ///
    /// When `current` does not extend what was seen (the provider revised
    /// earlier text), the characters past the previously seen length are
    /// returned.
    pub fn advance(&mut self, current: &str) -> Option<String> {
        if current.is_empty() || current == self.seen {
            return None;
        }

        let delta = current.strip_prefix(self.seen.as_str()).map_or_else(
            || current.chars().skip(self.seen.chars().count()).collect(),
            str::to_string,
        );
        current.clone_into(&mut self.seen);

        (!delta.is_empty()).then_some(delta)
    }
}

/// One SSE event: its status line and data payload.
#[derive(Debug, Default)]
struct RawEvent {
    status: Option<u16>,
    data: String,
}

impl RawEvent {
    fn is_empty(&self) -> bool {
        self.status.is_none() && self.data.is_empty()
    }
}

/// Converts a DashScope SSE byte stream into incremental text fragments.
///
/// An event with a non-200 status yields an error fragment and ends the
/// stream. Events whose data is not valid JSON are skipped.
pub fn dashscope_sse_to_text_stream<S, E>(byte_stream: S) -> impl Stream<Item = Fragment> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<StreamError> + Send + 'static,
{
    async_stream::stream! {
        let mut lines = std::pin::pin!(sse_lines(byte_stream));
        let mut event = RawEvent::default();
        let mut text = CumulativeText::new();
        let mut finished = false;

        while !finished {
            let line = match lines.next().await {
                Some(Ok(line)) => Some(line),
                Some(Err(e)) => {
                    yield Err(e);
                    return;
                }
                None => {
                    finished = true;
                    None
                }
            };

            match line.as_deref() {
                Some(line) if !line.trim().is_empty() => {
                    collect_field(&mut event, line.trim_end());
                    continue;
                }
                _ if event.is_empty() => continue,
                _ => {}
            }

            let current = std::mem::take(&mut event);
            match interpret_event(&current, &mut text) {
                EventOutcome::Text(delta) => yield Ok(delta),
                EventOutcome::Failed(err) => {
                    yield Err(err);
                    return;
                }
                EventOutcome::Nothing => {}
            }
        }
    }
}

fn collect_field(event: &mut RawEvent, line: &str) {
    if let Some(code) = line.strip_prefix(STATUS_PREFIX) {
        event.status = code.trim().parse().ok();
    } else if let Some(data) = line.strip_prefix("data:") {
        if !event.data.is_empty() {
            event.data.push('\n');
        }
        event.data.push_str(data.strip_prefix(' ').unwrap_or(data));
    }
}

/// Reads the error out of a rejected request's body.
///
/// With SSE enabled the body is itself an event (`:HTTP_STATUS/401`,
/// `data:{...}`); plain JSON bodies are accepted too.
fn rejection_message(body: &str) -> String {
    let mut event = RawEvent::default();
    for line in body.lines() {
        collect_field(&mut event, line.trim_end());
    }
    let payload = if event.data.is_empty() { body } else { &event.data };

    serde_json::from_str::<GenerationResponse>(payload)
        .map_or_else(|_| body.trim().to_string(), |r| r.error_text())
}

enum EventOutcome {
    Text(String),
    Failed(StreamError),
    Nothing,
}

fn interpret_event(event: &RawEvent, text: &mut CumulativeText) -> EventOutcome {
    let status = event.status.unwrap_or(SUCCESS_STATUS);
    let parsed = serde_json::from_str::<GenerationResponse>(&event.data);

    if status != SUCCESS_STATUS {
        let message = parsed.map_or_else(|_| event.data.trim().to_string(), |r| r.error_text());
        return EventOutcome::Failed(StreamError::from_status(status, message));
    }

    let Ok(response) = parsed else {
        tracing::trace!(data = %event.data, "skipping malformed DashScope event");
        return EventOutcome::Nothing;
    };

    response
        .content()
        .and_then(|current| text.advance(current))
        .map_or(EventOutcome::Nothing, EventOutcome::Text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::translation::error::StreamErrorKind;
    use futures_util::stream;

    fn event(id: u32, content: &str) -> String {
        format!(
            "id:{id}\nevent:result\n:HTTP_STATUS/200\ndata:{{\"output\":{{\"choices\":[{{\"message\":{{\"content\":\"{content}\",\"role\":\"assistant\"}},\"finish_reason\":\"null\"}}]}},\"request_id\":\"r1\"}}\n\n"
        )
    }

    async fn collect(chunks: Vec<String>) -> Vec<Fragment> {
        let chunks: Vec<Result<Bytes, StreamError>> =
            chunks.into_iter().map(|c| Ok(Bytes::from(c))).collect();
        dashscope_sse_to_text_stream(stream::iter(chunks))
            .collect()
            .await
    }

    #[test]
    fn test_cumulative_text_yields_suffix() {
        let mut text = CumulativeText::new();
        assert_eq!(text.advance("He"), Some("He".to_string()));
        assert_eq!(text.advance("Hello"), Some("llo".to_string()));
        assert_eq!(text.advance("Hello"), None);
        assert_eq!(text.advance(""), None);
        assert_eq!(text.advance("Hello, 世界"), Some(", 世界".to_string()));
    }

    #[test]
    fn test_cumulative_text_revised_prefix_uses_char_offset() {
        let mut text = CumulativeText::new();
        assert_eq!(text.advance("世界"), Some("世界".to_string()));
        assert_eq!(text.advance("世間です"), Some("です".to_string()));
    }

    #[tokio::test]
    async fn test_cumulative_events_become_deltas() {
        let fragments = collect(vec![event(1, "He"), event(2, "Hello")]).await;
        assert_eq!(fragments, vec![Ok("He".to_string()), Ok("llo".to_string())]);
    }

    #[tokio::test]
    async fn test_event_split_across_chunks() {
        let full = event(1, "He") + &event(2, "Hello");
        let (a, b) = full.split_at(30);
        let fragments = collect(vec![a.to_string(), b.to_string()]).await;
        assert_eq!(fragments, vec![Ok("He".to_string()), Ok("llo".to_string())]);
    }

    #[tokio::test]
    async fn test_last_event_without_blank_line_is_flushed() {
        let last = event(2, "Hello");
        let last = last.trim_end().to_string();
        let fragments = collect(vec![event(1, "He"), last]).await;
        assert_eq!(fragments, vec![Ok("He".to_string()), Ok("llo".to_string())]);
    }

    #[tokio::test]
    async fn test_error_status_yields_error_fragment() {
        let error_event = "id:1\nevent:error\n:HTTP_STATUS/401\ndata:{\"code\":\"InvalidApiKey\",\"message\":\"Invalid API-key provided.\",\"request_id\":\"r1\"}\n\n";
        let fragments = collect(vec![event(1, "He"), error_event.to_string()]).await;
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], Ok("He".to_string()));
        let err = fragments[1].as_ref().unwrap_err();
        assert_eq!(err.kind, StreamErrorKind::Auth);
        assert!(err.message.contains("InvalidApiKey"));
        assert!(err.message.contains("Invalid API-key provided."));
    }

    #[tokio::test]
    async fn test_malformed_event_is_skipped() {
        let broken = "id:2\nevent:result\n:HTTP_STATUS/200\ndata:{not json\n\n".to_string();
        let fragments = collect(vec![event(1, "He"), broken, event(3, "Hello")]).await;
        assert_eq!(fragments, vec![Ok("He".to_string()), Ok("llo".to_string())]);
    }

    #[test]
    fn test_rejection_message_from_sse_body() {
        let body = "id:1\nevent:error\n:HTTP_STATUS/401\ndata:{\"code\":\"InvalidApiKey\",\"message\":\"Invalid API-key provided.\",\"request_id\":\"r1\"}\n\n";
        assert_eq!(
            rejection_message(body),
            "InvalidApiKey: Invalid API-key provided."
        );
    }

    #[test]
    fn test_rejection_message_from_json_body() {
        let body = r#"{"code":"Throttling","message":"Requests rate limit exceeded."}"#;
        assert_eq!(
            rejection_message(body),
            "Throttling: Requests rate limit exceeded."
        );
    }

    #[test]
    fn test_rejection_message_falls_back_to_text() {
        assert_eq!(rejection_message("  upstream timeout \n"), "upstream timeout");
    }

    #[test]
    fn test_generation_request_body() {
        let prompt = crate::translation::prompt::build_prompt(
            "hi",
            "en",
            "zh-cn",
            crate::translation::classify::TextClass::Word,
            "zh-cn",
        );
        let body = GenerationRequest {
            model: "qwen-turbo".to_string(),
            input: GenerationInput {
                messages: chat_messages(&prompt),
            },
            parameters: GenerationParameters {
                result_format: "message",
                incremental_output: false,
                temperature: TEMPERATURE,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["parameters"]["result_format"], "message");
        assert_eq!(value["parameters"]["temperature"], 0.3);
        assert_eq!(value["input"]["messages"][1]["role"], "user");
    }
}
