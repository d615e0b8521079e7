pub mod openai;

pub use openai::OpenAiChatClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::session::Message;

/// Result of one completion call: the generated text plus the usage
/// accounting the gateway attributed to that single call.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    pub cost_usd: f64,
    pub total_tokens: u32,
}

/// A remote completion endpoint. Takes the full ordered history, including
/// the leading system message, and resolves once the model has answered.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<Completion>;
}
