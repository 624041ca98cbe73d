use reqwest::Client;
use serde::Deserialize;

use super::{ChatCompletionRequest, FragmentStream, stream_chat_completions};
use crate::translation::prompt::Prompt;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Streams chat completions from the OpenAI API (or a proxy in front of it).
#[derive(Debug, Clone)]
pub struct OpenAiAdapter {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiAdapter {
    pub const fn new(client: Client, base_url: String, api_key: String, model: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            model,
        }
    }

    pub fn stream(&self, prompt: &Prompt) -> FragmentStream {
        let url = format!("{}/chat/completions", self.base_url);
        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatCompletionRequest::streaming(&self.model, prompt));

        stream_chat_completions(request, url, error_message)
    }
}

/// Extracts `error.message` from an OpenAI error body, else returns the body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map_or_else(|_| body.trim().to_string(), |envelope| envelope.error.message)
}
