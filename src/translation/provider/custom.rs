use reqwest::Client;

use super::{ChatCompletionRequest, FragmentStream, stream_chat_completions};
use crate::translation::prompt::Prompt;

/// Streams from any OpenAI-compatible `/chat/completions` endpoint
/// (vLLM, llama.cpp server, Ollama, LM Studio, ...).
#[derive(Debug, Clone)]
pub struct CustomAdapter {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl CustomAdapter {
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

        // Compatible servers disagree on error bodies; report them verbatim.
        stream_chat_completions(request, url, |body| body.trim().to_string())
    }
}
