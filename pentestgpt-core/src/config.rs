//! Configuration types for a pentestgpt run

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default directory for storing conversations
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Model used for higher-level cognitive tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ReasoningModel {
    #[default]
    #[serde(rename = "gpt-4-o")]
    #[value(name = "gpt-4-o")]
    Gpt4O,
    #[serde(rename = "gpt-4")]
    #[value(name = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-4-turbo")]
    #[value(name = "gpt-4-turbo")]
    Gpt4Turbo,
}

impl ReasoningModel {
    /// Model identifier as sent to the upstream API
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningModel::Gpt4O => "gpt-4-o",
            ReasoningModel::Gpt4 => "gpt-4",
            ReasoningModel::Gpt4Turbo => "gpt-4-turbo",
        }
    }
}

impl fmt::Display for ReasoningModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model used for structural and grammatical language processing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ParsingModel {
    #[default]
    #[serde(rename = "gpt-4-o")]
    #[value(name = "gpt-4-o")]
    Gpt4O,
    #[serde(rename = "gpt-4-turbo")]
    #[value(name = "gpt-4-turbo")]
    Gpt4Turbo,
    #[serde(rename = "gpt-3.5-turbo-16k")]
    #[value(name = "gpt-3.5-turbo-16k")]
    Gpt35Turbo16k,
}

impl ParsingModel {
    /// Model identifier as sent to the upstream API
    pub fn as_str(&self) -> &'static str {
        match self {
            ParsingModel::Gpt4O => "gpt-4-o",
            ParsingModel::Gpt4Turbo => "gpt-4-turbo",
            ParsingModel::Gpt35Turbo16k => "gpt-3.5-turbo-16k",
        }
    }
}

impl fmt::Display for ParsingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete configuration for one pentestgpt invocation
///
/// Built once from command-line input, then handed to the session handler
/// unchanged for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PentestConfig {
    /// Directory for storing conversations
    pub log_dir: PathBuf,
    /// Model for higher-level decision making
    pub reasoning_model: ReasoningModel,
    /// Model for condensing raw tool output
    pub parsing_model: ParsingModel,
    /// Record a live conversation transcript in the log directory
    pub use_logging: bool,
    /// Deprecated: the cookie-based access path was removed, only API access remains
    pub use_api: bool,
}

impl Default for PentestConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            reasoning_model: ReasoningModel::default(),
            parsing_model: ParsingModel::default(),
            use_logging: false,
            use_api: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_documented_defaults() {
        let config = PentestConfig::default();
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.reasoning_model, ReasoningModel::Gpt4O);
        assert_eq!(config.parsing_model, ParsingModel::Gpt4O);
        assert!(!config.use_logging);
        assert!(config.use_api);
    }

    #[test]
    fn test_model_identifiers() {
        assert_eq!(ReasoningModel::Gpt4O.as_str(), "gpt-4-o");
        assert_eq!(ReasoningModel::Gpt4.as_str(), "gpt-4");
        assert_eq!(ReasoningModel::Gpt4Turbo.as_str(), "gpt-4-turbo");

        assert_eq!(ParsingModel::Gpt4O.as_str(), "gpt-4-o");
        assert_eq!(ParsingModel::Gpt4Turbo.as_str(), "gpt-4-turbo");
        assert_eq!(ParsingModel::Gpt35Turbo16k.as_str(), "gpt-3.5-turbo-16k");
    }

    #[test]
    fn test_display_matches_wire_spelling() {
        assert_eq!(ReasoningModel::Gpt4Turbo.to_string(), "gpt-4-turbo");
        assert_eq!(ParsingModel::Gpt35Turbo16k.to_string(), "gpt-3.5-turbo-16k");
    }

    #[test]
    fn test_model_serde_spelling() {
        let json = serde_json::to_string(&ReasoningModel::Gpt4O).expect("should serialize");
        assert_eq!(json, "\"gpt-4-o\"");

        let parsed: ParsingModel =
            serde_json::from_str("\"gpt-3.5-turbo-16k\"").expect("should deserialize");
        assert_eq!(parsed, ParsingModel::Gpt35Turbo16k);
    }
}
