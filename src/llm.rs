use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::{Value, json};

use crate::config::LlmConfig;
use crate::demo::demo_response;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    #[error("Invalid API key. Check [llm] api_key in your config or the OPENAI_API_KEY variable.")]
    InvalidApiKey,
    #[error(
        "Account issue: your API key has no remaining quota. Add billing at https://platform.openai.com/account/billing"
    )]
    QuotaExceeded,
    #[error("Rate Limit: too many requests. Wait a minute or upgrade your plan. Detail: {detail}")]
    RateLimited { detail: String },
    #[error(
        "Access denied: your API key may be invalid or expired. Check https://platform.openai.com/api-keys"
    )]
    AccessDenied,
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Failed to connect to the LLM endpoint: {0}")]
    Transport(String),
    #[error("Unexpected completion payload: {0}")]
    MalformedResponse(String),
}

impl LlmError {
    /// Rate and quota refusals are answered from the canned demo replies
    /// instead of surfacing as an error step.
    pub fn is_fallback_eligible(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::QuotaExceeded)
    }
}

pub trait CompletionBackend: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    fn provider_label(&self) -> &str;
}

/// Answers every prompt from the canned replies. Used whenever no usable API
/// key is configured.
#[derive(Debug, Clone)]
pub struct DemoBackend {
    label: String,
}

impl DemoBackend {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl CompletionBackend for DemoBackend {
    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        Ok(demo_response(prompt))
    }

    fn provider_label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    cfg: LlmConfig,
    api_key: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(cfg: LlmConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(|err| LlmError::Transport(err.to_string()))?;
        Ok(Self {
            cfg,
            api_key: api_key.into(),
            client,
        })
    }

    fn build_payload(&self, prompt: &str) -> Value {
        build_chat_payload(&self.cfg, prompt)
    }
}

impl CompletionBackend for OpenAiClient {
    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let payload = self.build_payload(prompt);
        tracing::debug!(endpoint = %self.cfg.endpoint, model = %self.cfg.model, "sending chat completion");
        let response = self
            .client
            .post(&self.cfg.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .map_err(|err| {
                tracing::warn!(error = %err, "chat completion transport failure");
                LlmError::Transport(err.to_string())
            })?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|err| LlmError::Transport(err.to_string()))?;
        if !status.is_success() {
            let err = classify_error_status(status, &body);
            tracing::warn!(status = status.as_u16(), error = %err, "chat completion rejected");
            return Err(err);
        }
        parse_completion_content(&body)
    }

    fn provider_label(&self) -> &str {
        &self.cfg.provider_label
    }
}

/// Picks the real client when a usable key is configured, the demo backend
/// otherwise.
pub fn backend_for(cfg: &LlmConfig) -> Result<Box<dyn CompletionBackend>, LlmError> {
    match cfg.effective_api_key() {
        Some(key) => {
            let key = key.to_string();
            Ok(Box::new(OpenAiClient::new(cfg.clone(), key)?))
        }
        None => {
            tracing::info!("no API key configured; answering from demo replies");
            Ok(Box::new(DemoBackend::new(cfg.provider_label.clone())))
        }
    }
}

pub fn build_chat_payload(cfg: &LlmConfig, prompt: &str) -> Value {
    json!({
        "model": cfg.model,
        "messages": [
            { "role": "system", "content": cfg.system_prompt },
            { "role": "user", "content": prompt },
        ],
        "temperature": cfg.temperature,
        "max_tokens": cfg.max_tokens,
    })
}

pub fn classify_error_status(status: StatusCode, body: &str) -> LlmError {
    let detail = error_message_from_body(body);
    match status {
        StatusCode::UNAUTHORIZED => LlmError::InvalidApiKey,
        StatusCode::TOO_MANY_REQUESTS => {
            let lower = detail.as_deref().unwrap_or_default().to_lowercase();
            if lower.contains("quota") || lower.contains("billing") {
                LlmError::QuotaExceeded
            } else {
                LlmError::RateLimited {
                    detail: detail.unwrap_or_else(|| "no detail provided".to_string()),
                }
            }
        }
        StatusCode::FORBIDDEN => LlmError::AccessDenied,
        _ => LlmError::Api {
            status: status.as_u16(),
            message: detail.unwrap_or_else(|| {
                format!("Failed to connect to LLM (HTTP {})", status.as_u16())
            }),
        },
    }
}

fn error_message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(ToString::to_string)
}

pub fn parse_completion_content(body: &str) -> Result<String, LlmError> {
    let value: Value =
        serde_json::from_str(body).map_err(|err| LlmError::MalformedResponse(err.to_string()))?;
    value
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| LlmError::MalformedResponse("missing choices[0].message.content".to_string()))
}

#[cfg(test)]
#[path = "../tests/unit/llm_tests.rs"]
mod tests;
