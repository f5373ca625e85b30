//! Provider factory for creating LLM provider instances

use std::sync::Arc;

use crate::{Error, Result};

use super::{LlmProvider, OpenAiProvider, UsageTracker};

/// Connection settings shared by every provider the factory builds
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl ProviderSettings {
    /// Read settings from OPENAI_API_KEY and OPENAI_BASE_URL
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            base_url: std::env::var("OPENAI_BASE_URL").ok(),
        }
    }
}

/// Create a provider for the given model identifier
pub fn create_provider(
    model: &str,
    settings: &ProviderSettings,
    usage: UsageTracker,
) -> Result<Arc<dyn LlmProvider>> {
    let api_key = settings
        .api_key
        .clone()
        .ok_or_else(|| Error::Provider("OPENAI_API_KEY not set".to_string()))?;

    let provider = if let Some(ref base_url) = settings.base_url {
        OpenAiProvider::with_base_url(api_key, base_url, model, usage)?
    } else {
        OpenAiProvider::with_api_key(api_key, model, usage)?
    };
    Ok(Arc::new(provider))
}
