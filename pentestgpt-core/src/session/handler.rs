//! Interactive pentest guidance session
//!
//! The session runs a two-model pipeline. Tool output fed in with `next`
//! goes through the parsing model first to condense it, and the condensed
//! summary drives the reasoning model, which maintains the test plan across
//! the conversation.

use std::io::{self, Write};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::config::PentestConfig;
use crate::providers::{
    create_provider, with_retries, CompletionRequest, LlmProvider, Message, ProviderSettings,
    RetryConfig, TokenUsage, UsageTracker,
};
use crate::{Error, Result};

use super::commands::Command;
use super::conversation::ConversationLog;
use super::prompts::Prompts;

/// Messages kept when building completion context
const HISTORY_LIMIT: usize = 40;

/// What the session loop should do after handling one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Print this reply and keep going
    Reply(String),
    /// Nothing to print
    Silent,
    /// End the session
    Quit,
}

/// Interactive session driven by a reasoning model and a parsing model
pub struct PentestGpt {
    config: PentestConfig,
    reasoning: Arc<dyn LlmProvider>,
    parsing: Arc<dyn LlmProvider>,
    prompts: Prompts,
    log: ConversationLog,
    history: Vec<Message>,
    usage: UsageTracker,
    retry: RetryConfig,
}

impl PentestGpt {
    /// Construct a session, wiring providers from the environment
    pub fn new(config: PentestConfig) -> Result<Self> {
        if !config.use_api {
            return Err(Error::Config(
                "useAPI=false is no longer supported; API access is required".to_string(),
            ));
        }

        let usage = UsageTracker::new();
        let settings = ProviderSettings::from_env();
        let reasoning = create_provider(config.reasoning_model.as_str(), &settings, usage.clone())?;
        let parsing = create_provider(config.parsing_model.as_str(), &settings, usage.clone())?;

        Self::with_providers(config, reasoning, parsing, usage)
    }

    /// Construct a session with explicit providers
    pub fn with_providers(
        config: PentestConfig,
        reasoning: Arc<dyn LlmProvider>,
        parsing: Arc<dyn LlmProvider>,
        usage: UsageTracker,
    ) -> Result<Self> {
        if !config.use_api {
            return Err(Error::Config(
                "useAPI=false is no longer supported; API access is required".to_string(),
            ));
        }

        let log = ConversationLog::new(&config.log_dir, config.use_logging)?;

        Ok(Self {
            config,
            reasoning,
            parsing,
            prompts: Prompts::default(),
            log,
            history: Vec::new(),
            usage,
            retry: RetryConfig::default(),
        })
    }

    pub fn config(&self) -> &PentestConfig {
        &self.config
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Accumulated token usage across both models
    pub fn usage(&self) -> TokenUsage {
        self.usage.snapshot()
    }

    /// Run the interactive session until quit, interrupt, or EOF
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "Starting session {} (reasoning: {}, parsing: {})",
            self.log.session_id(),
            self.config.reasoning_model,
            self.config.parsing_model
        );

        println!("PentestGPT interactive session. Type 'help' for commands.");

        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        // The first non-empty line describes the engagement
        let description = loop {
            print!("Describe the target and scope of this engagement: ");
            io::stdout().flush()?;

            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => None,
            };

            match line {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
                None => {
                    info!("Session ended before initialization");
                    return Ok(());
                }
            }
        };

        let plan = self.initialize(&description).await?;
        println!("\n{}\n", plan);

        loop {
            print!("> ");
            io::stdout().flush()?;

            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupt received, ending session");
                    None
                }
            };

            let Some(line) = line else { break };

            match self.process_input(&line).await {
                Ok(SessionOutcome::Reply(reply)) => println!("\n{}\n", reply),
                Ok(SessionOutcome::Silent) => {}
                Ok(SessionOutcome::Quit) => break,
                Err(e) => {
                    // Keep the history even when a command fails hard
                    if let Err(save_err) = self.log.save_history(&self.history) {
                        warn!("Could not save history: {}", save_err);
                    }
                    return Err(e);
                }
            }
        }

        if !self.history.is_empty() {
            let path = self.log.save_history(&self.history)?;
            info!("Conversation history saved to {}", path.display());
        }

        let totals = self.usage.snapshot();
        info!(
            "Session {} finished ({} input tokens, {} output tokens)",
            self.log.session_id(),
            totals.input_tokens,
            totals.output_tokens
        );

        Ok(())
    }

    /// Send the engagement description through the task initialization stage
    pub async fn initialize(&mut self, description: &str) -> Result<String> {
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::Session(
                "Engagement description is empty".to_string(),
            ));
        }

        let system = self.prompts.task_init.prompt.clone();
        let provider = Arc::clone(&self.reasoning);
        self.ask(provider, &system, description).await
    }

    /// Handle one line of user input
    pub async fn process_input(&mut self, input: &str) -> Result<SessionOutcome> {
        match Command::parse(input) {
            Command::Empty => Ok(SessionOutcome::Silent),
            Command::Help => Ok(SessionOutcome::Reply(help_text())),
            Command::Next(output) => {
                if output.is_empty() {
                    return Ok(SessionOutcome::Reply(
                        "Usage: next <tool output to analyze>".to_string(),
                    ));
                }

                let condensed = self.condense(&output).await?;
                let system = self.prompts.reasoning.prompt.clone();
                let provider = Arc::clone(&self.reasoning);
                let plan = self
                    .ask(provider, &system, &format!("New findings:\n{}", condensed))
                    .await?;
                Ok(SessionOutcome::Reply(plan))
            }
            Command::Todo => {
                let system = self.prompts.todo.prompt.clone();
                let provider = Arc::clone(&self.reasoning);
                let todo = self
                    .ask(provider, &system, "What should I work on next?")
                    .await?;
                Ok(SessionOutcome::Reply(todo))
            }
            Command::Discuss(topic) => {
                if topic.is_empty() {
                    return Ok(SessionOutcome::Reply(
                        "Usage: discuss <question or idea>".to_string(),
                    ));
                }

                let system = self.prompts.discussion.prompt.clone();
                let provider = Arc::clone(&self.reasoning);
                let reply = self.ask(provider, &system, &topic).await?;
                Ok(SessionOutcome::Reply(reply))
            }
            Command::Save => {
                let path = self.log.save_history(&self.history)?;
                Ok(SessionOutcome::Reply(format!(
                    "History saved to {}",
                    path.display()
                )))
            }
            Command::Quit => Ok(SessionOutcome::Quit),
            Command::Unknown(line) => Ok(SessionOutcome::Reply(format!(
                "Unknown command '{}'. Type 'help' for available commands.",
                line
            ))),
        }
    }

    /// One-shot parsing stage call, not recorded in session history
    async fn condense(&self, output: &str) -> Result<String> {
        let request = CompletionRequest::new(vec![Message::user(output)])
            .with_system(&self.prompts.parsing.prompt);

        let provider = Arc::clone(&self.parsing);
        let response = with_retries(&self.retry, || {
            let provider = Arc::clone(&provider);
            let request = request.clone();
            async move { provider.complete(request).await }
        })
        .await?;

        Ok(response.content)
    }

    /// One reasoning round trip with history, retry, and transcript logging
    async fn ask(
        &mut self,
        provider: Arc<dyn LlmProvider>,
        system: &str,
        content: &str,
    ) -> Result<String> {
        let user = Message::user(content);
        self.log.log_message(&user)?;
        self.history.push(user);
        trim_to_limit(&mut self.history, HISTORY_LIMIT);

        let request = CompletionRequest::new(self.history.clone()).with_system(system);

        let response = with_retries(&self.retry, || {
            let provider = Arc::clone(&provider);
            let request = request.clone();
            async move { provider.complete(request).await }
        })
        .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                error!("Completion failed: {}", e);
                return Err(e);
            }
        };

        let assistant = Message::assistant(&response.content);
        self.log.log_message(&assistant)?;
        self.history.push(assistant);

        Ok(response.content)
    }
}

/// Drop the oldest messages once the history grows past the limit
fn trim_to_limit(history: &mut Vec<Message>, limit: usize) {
    if history.len() > limit {
        let excess = history.len() - limit;
        history.drain(..excess);
    }
}

fn help_text() -> String {
    [
        "Available commands:",
        "  help              Show this message",
        "  next <output>     Analyze tool output and update the test plan",
        "  todo              Ask for the most favorable next task",
        "  discuss <topic>   Discuss an approach or problem",
        "  save              Write conversation history to the log directory",
        "  quit              Save history and end the session",
    ]
    .join("\n")
}
