//! LLM Client: the single point of entry for generation-service calls.
//!
//! ARCHITECTURAL RULE: No other module may call the chat-completions API directly.
//! Pipeline code depends on the `AnalysisBackend` trait; `LlmClient` is its production impl.
//!
//! Model and temperature are constants: identical prompts should yield replies that vary
//! as little as possible.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub mod prompts;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for every analysis call.
pub const MODEL: &str = "gpt-4o-mini";
/// Low sampling temperature to minimize reply variance across identical prompts.
pub const TEMPERATURE: f32 = 0.3;
const MAX_RETRIES: u32 = 3;
const BACKOFF_BASE: Duration = Duration::from_millis(1000);
const QUOTA_ERROR_CODE: &str = "insufficient_quota";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("gave up after {retries} retries: {source}")]
    RetriesExhausted {
        retries: u32,
        #[source]
        source: Box<LlmError>,
    },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("request cancelled")]
    Cancelled,
}

impl LlmError {
    /// Transport hiccups, 5xx and plain rate limiting are worth another attempt.
    /// Auth failures, bad requests and exhausted quota are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            LlmError::Api { status, code, .. } => {
                *status >= 500 || (*status == 429 && code.as_deref() != Some(QUOTA_ERROR_CODE))
            }
            LlmError::RetriesExhausted { .. } | LlmError::EmptyContent | LlmError::Cancelled => {
                false
            }
        }
    }
}

/// Anything that can turn one prompt into one raw reply.
///
/// Carried in `AppState` as `Arc<dyn AnalysisBackend>`.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn complete(&self, prompt: &str, cancel: &CancellationToken)
        -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if it has any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    code: Option<String>,
}

/// Chat-completions client with bounded retry and cooperative cancellation.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
    backoff_base: Duration,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_url,
            api_key,
            backoff_base: BACKOFF_BASE,
        })
    }

    #[cfg(test)]
    fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// Sends one user-role message and returns the full response object.
    ///
    /// Retries transient failures up to `MAX_RETRIES` times with exponential backoff
    /// (1s, 2s, 4s). Non-transient failures return immediately. Cancelling `cancel`
    /// aborts the in-flight request or the pending backoff.
    pub async fn call(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            temperature: TEMPERATURE,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay = self.backoff_base * (1 << (attempt - 1));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(LlmError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(LlmError::Cancelled),
                outcome = self.send_once(&request_body) => outcome,
            };

            match outcome {
                Ok(response) => {
                    if let Some(usage) = &response.usage {
                        debug!(
                            "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                            usage.prompt_tokens, usage.completion_tokens
                        );
                    }
                    return Ok(response);
                }
                Err(e) if e.is_retryable() => {
                    warn!("LLM call failed with transient error: {e}");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(LlmError::RetriesExhausted {
            retries: MAX_RETRIES,
            source: Box::new(last_error.unwrap_or(LlmError::EmptyContent)),
        })
    }

    async fn send_once(&self, body: &ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (message, code) = match serde_json::from_str::<ApiErrorEnvelope>(&body) {
                Ok(envelope) => (envelope.error.message, envelope.error.code),
                Err(_) => (body, None),
            };
            return Err(LlmError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl AnalysisBackend for LlmClient {
    async fn complete(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, LlmError> {
        let response = self.call(prompt, cancel).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub(crate) fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
