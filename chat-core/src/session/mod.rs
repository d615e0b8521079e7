pub mod turn;

pub use turn::run_turn;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// System message every fresh conversation starts from.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: i64,
}

impl Message {
    fn new(role: Role, content: String) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);

        Self {
            role,
            content,
            timestamp,
        }
    }
}

/// One conversation: the ordered message history plus the parallel cost and
/// token samples, one entry each per completed exchange.
///
/// Invariants after every operation:
/// - exactly one system message exists and it is first;
/// - `costs.len() == tokens.len()`;
/// - `messages.len() == 1 + 2 * costs.len()` as long as every turn succeeded
///   (a failed turn leaves its user message in place with no samples).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    messages: Vec<Message>,
    costs: Vec<f64>,
    tokens: Vec<u32>,
    input_price_per_1k: f64,
}

impl ChatSession {
    pub fn new() -> Self {
        let mut session = Self {
            session_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            messages: Vec::new(),
            costs: Vec::new(),
            tokens: Vec::new(),
            input_price_per_1k: 0.0,
        };
        session.reset();
        session
    }

    /// Clear the history back to the single system message and empty the
    /// cost/token sequences. The active input price survives a clear, since
    /// the model choice outlives the conversation.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages
            .push(Message::new(Role::System, SYSTEM_PROMPT.to_string()));
        self.costs.clear();
        self.tokens.clear();
    }

    pub fn add_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::new(Role::User, content.into()));
    }

    /// Record one completed exchange: the assistant reply plus its cost and
    /// token samples. The three appends happen together, all or nothing.
    pub fn add_exchange(&mut self, answer: impl Into<String>, cost_usd: f64, total_tokens: u32) {
        self.messages
            .push(Message::new(Role::Assistant, answer.into()));
        self.costs.push(cost_usd);
        self.tokens.push(total_tokens);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    pub fn tokens(&self) -> &[u32] {
        &self.tokens
    }

    /// Completed exchanges so far.
    pub fn turn_count(&self) -> usize {
        self.costs.len()
    }

    /// Install the active model's input price (USD per 1000 tokens) for the
    /// per-turn display recomputation.
    pub fn set_input_price(&mut self, price_per_1k: f64) {
        self.input_price_per_1k = price_per_1k;
    }

    pub fn input_price(&self) -> f64 {
        self.input_price_per_1k
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
