//! Session command parsing

/// One line of user input classified into a session action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show available commands
    Help,
    /// Feed tool output into the parsing stage, then plan the next step
    Next(String),
    /// Ask the reasoning model for the most favorable next task
    Todo,
    /// Free-form discussion with the reasoning model
    Discuss(String),
    /// Persist the conversation history to disk
    Save,
    /// Save history and end the session
    Quit,
    /// Blank input, ignored
    Empty,
    /// Anything unrecognized
    Unknown(String),
}

impl Command {
    /// Parse one line of user input
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }

        let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (trimmed, ""),
        };

        match keyword.to_lowercase().as_str() {
            "help" => Command::Help,
            "next" => Command::Next(rest.to_string()),
            "todo" => Command::Todo,
            "discuss" => Command::Discuss(rest.to_string()),
            "save" => Command::Save,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_keywords() {
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("todo"), Command::Todo);
        assert_eq!(Command::parse("save"), Command::Save);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("exit"), Command::Quit);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Command::parse("HELP"), Command::Help);
        assert_eq!(Command::parse("Quit"), Command::Quit);
    }

    #[test]
    fn test_parse_next_with_payload() {
        assert_eq!(
            Command::parse("next nmap found ports 22 and 80 open"),
            Command::Next("nmap found ports 22 and 80 open".to_string())
        );
    }

    #[test]
    fn test_parse_next_without_payload() {
        assert_eq!(Command::parse("next"), Command::Next(String::new()));
    }

    #[test]
    fn test_parse_discuss_with_topic() {
        assert_eq!(
            Command::parse("discuss should I try hydra here?"),
            Command::Discuss("should I try hydra here?".to_string())
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Command::parse("  todo  "), Command::Todo);
        assert_eq!(
            Command::parse("next   output with   spaces"),
            Command::Next("output with   spaces".to_string())
        );
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("   "), Command::Empty);
    }

    #[test]
    fn test_parse_unknown_input() {
        assert_eq!(
            Command::parse("frobnicate the server"),
            Command::Unknown("frobnicate the server".to_string())
        );
    }
}
