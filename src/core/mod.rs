pub mod agent;
pub mod history;

pub use agent::JesterAgent;
pub use history::{ChatHistory, ChatMessage};
