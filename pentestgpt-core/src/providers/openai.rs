//! OpenAI provider implementation using rig-core

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openai;

use crate::{Error, Result};

use super::{CompletionRequest, CompletionResponse, LlmProvider, TokenUsage, UsageTracker};

/// OpenAI provider using rig-core
pub struct OpenAiProvider {
    client: openai::Client,
    model: String,
    usage: UsageTracker,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider from OPENAI_API_KEY env var
    pub fn new(model: impl Into<String>, usage: UsageTracker) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| Error::Provider("OPENAI_API_KEY not set".to_string()))?;

        Self::with_api_key(api_key, model, usage)
    }

    /// Create with custom API key
    pub fn with_api_key(
        api_key: impl Into<String>,
        model: impl Into<String>,
        usage: UsageTracker,
    ) -> Result<Self> {
        let client = openai::Client::builder()
            .api_key(api_key.into())
            .build()
            .map_err(|e| Error::Provider(format!("Failed to build OpenAI client: {}", e)))?;

        Ok(Self {
            client,
            model: model.into(),
            usage,
        })
    }

    /// Create with custom base URL (for proxies or compatible APIs)
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        usage: UsageTracker,
    ) -> Result<Self> {
        let client = openai::Client::builder()
            .api_key(api_key.into())
            .base_url(base_url.into())
            .build()
            .map_err(|e| Error::Provider(format!("Failed to build OpenAI client: {}", e)))?;

        Ok(Self {
            client,
            model: model.into(),
            usage,
        })
    }

    /// The model identifier this provider sends to the API
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        // Build prompt from messages
        let prompt = request
            .messages
            .iter()
            .map(|m| format!("{}: {}", m.role.as_str(), m.content))
            .collect::<Vec<_>>()
            .join("\n");

        // Build and execute request using Prompt trait with agent
        let mut builder = self
            .client
            .agent(&self.model)
            .preamble(
                request
                    .system
                    .as_deref()
                    .unwrap_or("You are a helpful assistant."),
            )
            .max_tokens(request.max_tokens.unwrap_or(4096) as u64);

        if let Some(temperature) = request.temperature {
            builder = builder.temperature(f64::from(temperature));
        }

        let agent = builder.build();

        let response = agent
            .prompt(&prompt)
            .await
            .map_err(|e| Error::Provider(format!("OpenAI completion failed: {}", e)))?;

        // Record token usage (estimated since rig doesn't expose raw usage directly)
        let estimated_input = prompt.len() as u64 / 4; // Rough token estimate
        let estimated_output = response.len() as u64 / 4;
        let usage = TokenUsage {
            input_tokens: estimated_input,
            output_tokens: estimated_output,
        };
        self.usage.record(&usage);

        Ok(CompletionResponse {
            content: response,
            usage,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_with_api_key() {
        let result = OpenAiProvider::with_api_key("test-key", "gpt-4o", UsageTracker::new());
        assert!(result.is_ok());

        let provider = result.unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-4o");
    }

    #[test]
    fn test_provider_with_base_url() {
        let result = OpenAiProvider::with_base_url(
            "test-key",
            "http://localhost:4000",
            "gpt-4o",
            UsageTracker::new(),
        );
        assert!(result.is_ok());
    }
}
