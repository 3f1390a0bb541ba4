//! OpenAI-compatible chat completion provider (`/v1/chat/completions`).
//!
//! One request per call: a system message and a user message in, the first
//! choice's text out. All wire types are private to this module.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::config::OpenAiConfig;
use crate::llm::{Prompt, ProviderError};

// ── Public provider ───────────────────────────────────────────────────────────

/// Adapter for any HTTP endpoint implementing `/v1/chat/completions`.
///
/// Constructed once at startup, then cheaply cloned because
/// `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    client: Client,
    api_base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_seconds: u64,
    api_key: Option<String>,
}

impl OpenAiCompatibleProvider {
    /// `api_key`, when present, is sent as `Authorization: Bearer <key>`.
    pub fn new(config: &OpenAiConfig, api_key: Option<String>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_seconds: config.timeout_seconds,
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: [
                Message { role: "system", content: &prompt.system },
                Message { role: "user", content: &prompt.human },
            ],
            temperature: self.temperature,
            max_completion_tokens: self.max_tokens,
        };

        debug!(
            model = %self.model,
            temperature = self.temperature,
            max_tokens = self.max_tokens,
            content_len = prompt.human.len(),
            "sending LLM request"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full LLM request payload");
        }

        let mut req = self.client.post(&self.api_base_url).json(&payload);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await.map_err(|e| self.transport_error(e))?;
        let response = check_status(response).await?;

        let parsed = response.json::<ChatCompletionResponse>().await.map_err(|e| {
            if e.is_timeout() {
                return self.transport_error(e);
            }
            error!(error = %e, "failed to deserialize LLM response");
            ProviderError::Decode(e.to_string())
        })?;

        debug!(choices = parsed.choices.len(), "received LLM response");

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ProviderError::EmptyCompletion)
    }

    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            error!(url = %self.api_base_url, timeout_seconds = self.timeout_seconds, "LLM request timed out");
            ProviderError::Timeout(self.timeout_seconds)
        } else {
            error!(url = %self.api_base_url, error = %e, "LLM HTTP request failed (transport)");
            ProviderError::Transport(e.to_string())
        }
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    temperature: f32,
    max_completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// Error envelope used by OpenAI and compatible APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

/// Return the response if successful, otherwise a status error carrying the
/// provider's own message when it sent one.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let message = if let Ok(env) = serde_json::from_str::<ErrorEnvelope>(&body) {
        let code = env
            .error
            .code
            .map(|v| match v {
                serde_json::Value::String(s) => format!(" [code={s}]"),
                other => format!(" [code={other}]"),
            })
            .unwrap_or_default();
        format!("HTTP {status}{code}: {}", env.error.message)
    } else {
        format!("HTTP {status}: {body}")
    };

    error!(%status, %message, "LLM request returned HTTP error");
    Err(ProviderError::Status(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    /// Serve `body` with `status` after `delay`, recording auth header + request body.
    async fn spawn_mock(status: StatusCode, body: Value, delay: Duration) -> (String, Seen) {
        let seen: Seen = Arc::default();
        let recorder = seen.clone();
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(req): Json<Value>| {
                let recorder = recorder.clone();
                let body = body.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    recorder.lock().unwrap().push((auth, req));
                    tokio::time::sleep(delay).await;
                    (status, Json(body))
                }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/v1/chat/completions"), seen)
    }

    fn config(url: &str, timeout_seconds: u64) -> OpenAiConfig {
        OpenAiConfig {
            api_base_url: url.to_string(),
            model: "gpt-5".into(),
            temperature: 1.0,
            max_tokens: 512,
            timeout_seconds,
        }
    }

    fn prompt() -> Prompt {
        Prompt { system: "be an engineer".into(), human: "Explain caching".into() }
    }

    #[tokio::test]
    async fn sends_both_messages_and_fixed_options() {
        let reply = json!({ "choices": [{ "message": { "content": "cached answer" } }] });
        let (url, seen) = spawn_mock(StatusCode::OK, reply, Duration::ZERO).await;
        let p = OpenAiCompatibleProvider::new(&config(&url, 5), Some("sk-test".into())).unwrap();

        assert_eq!(p.complete(&prompt()).await.unwrap(), "cached answer");

        let seen = seen.lock().unwrap();
        let (auth, body) = &seen[0];
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(body["model"], "gpt-5");
        assert_eq!(body["temperature"], 1.0);
        assert_eq!(body["max_completion_tokens"], 512);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be an engineer");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Explain caching");
    }

    #[tokio::test]
    async fn content_whitespace_is_preserved() {
        let content = "  ```\ncode\n```\n";
        let reply = json!({ "choices": [{ "message": { "content": content } }] });
        let (url, _) = spawn_mock(StatusCode::OK, reply, Duration::ZERO).await;
        let p = OpenAiCompatibleProvider::new(&config(&url, 5), None).unwrap();

        assert_eq!(p.complete(&prompt()).await.unwrap(), content);
    }

    #[tokio::test]
    async fn whitespace_only_content_is_empty_completion() {
        let reply = json!({ "choices": [{ "message": { "content": " \n\t" } }] });
        let (url, _) = spawn_mock(StatusCode::OK, reply, Duration::ZERO).await;
        let p = OpenAiCompatibleProvider::new(&config(&url, 5), None).unwrap();

        let err = p.complete(&prompt()).await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyCompletion));
    }

    #[tokio::test]
    async fn error_envelope_becomes_status_error() {
        let reply = json!({ "error": { "message": "Rate limit reached", "code": "rate_limit_exceeded" } });
        let (url, _) = spawn_mock(StatusCode::TOO_MANY_REQUESTS, reply, Duration::ZERO).await;
        let p = OpenAiCompatibleProvider::new(&config(&url, 5), None).unwrap();

        let err = p.complete(&prompt()).await.unwrap_err();
        assert_eq!(err.category(), "HttpStatusError");
        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("rate_limit_exceeded"));
        assert!(msg.contains("Rate limit reached"));
    }

    #[tokio::test]
    async fn missing_content_is_empty_completion() {
        let reply = json!({ "choices": [{ "message": { "content": null } }] });
        let (url, _) = spawn_mock(StatusCode::OK, reply, Duration::ZERO).await;
        let p = OpenAiCompatibleProvider::new(&config(&url, 5), None).unwrap();

        let err = p.complete(&prompt()).await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyCompletion));
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let (url, _) = spawn_mock(StatusCode::OK, json!({ "unexpected": true }), Duration::ZERO).await;
        let p = OpenAiCompatibleProvider::new(&config(&url, 5), None).unwrap();

        let err = p.complete(&prompt()).await.unwrap_err();
        assert_eq!(err.category(), "DecodeError");
    }

    #[tokio::test]
    async fn slow_endpoint_times_out() {
        let reply = json!({ "choices": [{ "message": { "content": "late" } }] });
        let (url, _) = spawn_mock(StatusCode::OK, reply, Duration::from_secs(3)).await;
        let p = OpenAiCompatibleProvider::new(&config(&url, 1), None).unwrap();

        let err = p.complete(&prompt()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Timeout(1)), "got {err:?}");
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = format!("http://{addr}/v1/chat/completions");
        let p = OpenAiCompatibleProvider::new(&config(&url, 5), None).unwrap();

        let err = p.complete(&prompt()).await.unwrap_err();
        assert_eq!(err.category(), "TransportError");
    }
}
