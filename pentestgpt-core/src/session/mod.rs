//! Interactive session pipeline

pub mod commands;
pub mod conversation;
pub mod handler;
pub mod prompts;

pub use commands::Command;
pub use conversation::{ConversationLog, SavedConversation};
pub use handler::{PentestGpt, SessionOutcome};
pub use prompts::Prompts;
