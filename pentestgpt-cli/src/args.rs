//! CLI argument parsing

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use pentestgpt_core::config::{ParsingModel, PentestConfig, ReasoningModel, DEFAULT_LOG_DIR};

#[derive(Debug, Parser)]
#[command(name = "pentestgpt")]
#[command(author, version, about = "LLM-assisted penetration testing companion")]
pub struct Args {
    /// Directory for session logs and saved conversations
    #[arg(long = "log_dir", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Model that maintains the test plan and picks next steps
    #[arg(long = "reasoning_model", value_enum, default_value_t = ReasoningModel::Gpt4O)]
    pub reasoning_model: ReasoningModel,

    /// Model that condenses raw tool output before planning
    #[arg(long = "parsing_model", value_enum, default_value_t = ParsingModel::Gpt4O)]
    pub parsing_model: ParsingModel,

    /// Record a live conversation transcript in the log directory
    #[arg(long)]
    pub logging: bool,

    /// Use the OpenAI API (deprecated; API access is always required)
    #[arg(long = "useAPI", action = ArgAction::SetTrue, default_value_t = true)]
    pub use_api: bool,
}

impl Args {
    /// Convert parsed flags into the session configuration
    pub fn into_config(self) -> PentestConfig {
        PentestConfig {
            log_dir: self.log_dir,
            reasoning_model: self.reasoning_model,
            parsing_model: self.parsing_model,
            use_logging: self.logging,
            use_api: self.use_api,
        }
    }
}
