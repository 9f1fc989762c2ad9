use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{CompletionProvider, CompletionRequest};
use crate::config::StoryConfig;
use crate::error::{AppError, Result};

pub const STORY_TEMPERATURE: f32 = 0.75;

const CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize, Default)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat-completion client.
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &StoryConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(config.request_timeout))
            .build()
            .map_err(|e| AppError::Other(e.into()))?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        tracing::debug!(
            prompt.len = request.prompt.len(),
            max_tokens = request.max_tokens,
            model = %self.model,
            "sending chat completion"
        );

        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage { role: "user", content: &request.prompt }],
            temperature: STORY_TEMPERATURE,
            max_tokens: request.max_tokens,
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let text = resp.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "{} (Status: {})",
                api_error_message(status, &text),
                status.as_u16()
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "unparseable completion body, treating as empty");
            ChatResponse::default()
        });
        let story = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        tracing::debug!(
            story.len = story.len(),
            preview = %story.chars().take(100).collect::<String>(),
            "received completion"
        );
        Ok(story)
    }
}

fn transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::Upstream(format!("request timed out ({e})"))
    } else {
        AppError::Upstream(e.to_string())
    }
}

// Prefers `error.message` from an OpenAI-style body, then the raw body, then the reason phrase.
fn api_error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        match v.get("error")? {
            Value::String(s) => Some(s.clone()),
            obj => obj.get("message")?.as_str().map(str::to_string),
        }
    });
    from_json
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string())
}
