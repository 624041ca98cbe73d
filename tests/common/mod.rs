#![allow(clippy::unwrap_used, dead_code)]
//! SSE bodies and endpoints shared by the integration tests.

use std::net::TcpListener;

/// One OpenAI chat-completion chunk carrying `delta`.
pub fn openai_event(delta: &str) -> String {
    let chunk = serde_json::json!({
        "choices": [{ "delta": { "content": delta } }]
    });
    format!("data: {chunk}\n\n")
}

/// Builds an OpenAI-style SSE body from content deltas, ending with `[DONE]`.
pub fn openai_sse(deltas: &[&str]) -> String {
    let mut body: String = deltas.iter().map(|delta| openai_event(delta)).collect();
    body.push_str("data: [DONE]\n\n");
    body
}

/// Builds a DashScope SSE body where each event repeats the whole answer so far.
pub fn dashscope_sse(contents: &[&str]) -> String {
    contents
        .iter()
        .enumerate()
        .map(|(i, content)| {
            let data = serde_json::json!({
                "output": { "choices": [{ "message": { "content": content, "role": "assistant" } }] },
                "request_id": "req-1"
            });
            format!("id:{}\nevent:result\n:HTTP_STATUS/200\ndata:{data}\n\n", i + 1)
        })
        .collect()
}

/// A base URL nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
