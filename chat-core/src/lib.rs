pub mod cost;
pub mod error;
pub mod gateway;
pub mod model;
pub mod observability;
pub mod session;

pub use cost::{CostReport, PricingTable, EXCHANGE_RATE_JPY};
pub use error::{ChatError, Result};
pub use gateway::{Completion, CompletionGateway, OpenAiChatClient};
pub use model::{select_model, Credentials, ModelChoice, ModelProfile};
pub use observability::setup_logging;
pub use session::{run_turn, ChatSession, Message, Role};
