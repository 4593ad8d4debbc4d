//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to manage threads and the session without sending
//! messages to the backend.

use crate::chat::prefs::Theme;

/// A parsed chat command.
///
/// These commands control the conversation client and are never sent to the
/// backend as prompts.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Start a new, empty conversation thread.
    New,

    /// List all known threads.
    Threads,

    /// Open a thread by identifier or list index.
    Open(String),

    /// Delete a thread by identifier or list index (after confirmation).
    Delete(String),

    /// Filter the thread list by title substring.
    Search(String),

    /// Set and persist the display theme.
    Theme(Theme),

    /// Resubmit the prompt preserved from a failed round trip.
    Retry,

    /// Display session statistics (message count, thread count, etc.).
    Stats,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be submitted as a prompt.
///
/// # Examples
///
/// ```
/// # use colloquy::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/open T1").is_some());
/// assert!(parse_command("Hello there!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "new" => ChatCommand::New,
        "threads" | "list" => ChatCommand::Threads,
        "open" => match argument {
            Some(target) => ChatCommand::Open(target.to_string()),
            None => ChatCommand::Invalid("/open requires a thread id or index".to_string()),
        },
        "delete" => match argument {
            Some(target) => ChatCommand::Delete(target.to_string()),
            None => ChatCommand::Invalid("/delete requires a thread id or index".to_string()),
        },
        "search" => ChatCommand::Search(argument.unwrap_or("").to_string()),
        "theme" => match argument {
            Some(arg) => match arg.parse::<Theme>() {
                Ok(theme) => ChatCommand::Theme(theme),
                Err(_) => ChatCommand::Invalid("/theme expects 'dark' or 'light'".to_string()),
            },
            None => ChatCommand::Invalid("/theme expects 'dark' or 'light'".to_string()),
        },
        "retry" => ChatCommand::Retry,
        "stats" | "status" => ChatCommand::Stats,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /new                   Start a new conversation
  /threads               List conversations
  /open <id|index>       Open a conversation
  /delete <id|index>     Delete a conversation (asks for confirmation)
  /search <text>         Filter conversations by title
  /theme dark|light      Set and persist the display theme
  /retry                 Resend the last failed prompt
  /stats                 Show session statistics
  /help                  Show this help message
  /quit                  Exit the chat"#
}
