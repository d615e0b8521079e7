use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{Completion, CompletionGateway};
use crate::error::{ChatError, Result};
use crate::model::{Credentials, ModelProfile};
use crate::session::Message;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const COMPLETIONS_PATH: &str = "/chat/completions";

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal subset of the chat completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
    usage: Usage,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// HTTP client for an OpenAI-compatible chat completions endpoint, bound to
/// one model, temperature, and set of credentials for the whole session.
///
/// Usage accounting lives here: the response's token usage is priced with the
/// profile's input/output rates, and callers receive the resulting per-call
/// cost as an opaque figure.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    credentials: Credentials,
    profile: ModelProfile,
    temperature: f64,
    url: String,
}

impl OpenAiChatClient {
    pub fn new(credentials: Credentials, profile: ModelProfile, temperature: f64) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            profile,
            temperature,
            url: format!("{DEFAULT_BASE_URL}{COMPLETIONS_PATH}"),
        }
    }

    /// Point the client at a different OpenAI-compatible server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.url = format!("{}{}", base_url.trim_end_matches('/'), COMPLETIONS_PATH);
        self
    }

    pub fn model_id(&self) -> &str {
        &self.profile.model_id
    }
}

#[async_trait]
impl CompletionGateway for OpenAiChatClient {
    async fn complete(&self, messages: &[Message]) -> Result<Completion> {
        let request = ApiRequest {
            model: &self.profile.model_id,
            temperature: self.temperature,
            messages: messages
                .iter()
                .map(|m| ApiMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        };

        let mut builder = self
            .client
            .post(&self.url)
            .bearer_auth(&self.credentials.api_key)
            .json(&request);
        if let Some(org) = &self.credentials.organization {
            builder = builder.header("OpenAI-Organization", org);
        }

        let response = builder.send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Authentication(format!("{status}: {body}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Completion(format!("{status}: {body}")));
        }

        let api_response: ApiResponse = response.json().await?;
        let content = api_response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                ChatError::Completion("response carried no message content".to_string())
            })?;

        let usage = api_response.usage;
        let cost_usd = self
            .profile
            .pricing
            .cost(usage.prompt_tokens, usage.completion_tokens);
        debug!(
            model = %self.profile.model_id,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            cost_usd,
            "completion call accounted"
        );

        Ok(Completion {
            content,
            cost_usd,
            total_tokens: usage.total_tokens,
        })
    }
}
