//! LLM provider integration

pub mod factory;
pub mod openai;
pub mod retry;
pub mod traits;
pub mod usage;

pub use factory::{create_provider, ProviderSettings};
pub use openai::OpenAiProvider;
pub use retry::{with_retries, RetryConfig};
pub use traits::{
    CompletionRequest, CompletionResponse, LlmProvider, Message, Role, TokenUsage,
};
pub use usage::UsageTracker;
