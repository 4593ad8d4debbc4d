//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling client behavior.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::reveal::DEFAULT_CADENCE;

/// Default backend base URL.
const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// File name of the theme preference under the home directory.
const PREFS_FILE_NAME: &str = ".colloquy-theme.json";

/// Command-line arguments for the colloquy-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Base URL of the chat backend.
    #[arrrg(optional, "Backend base URL (default: http://localhost:8080/api/)", "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECS")]
    pub timeout: Option<u32>,

    /// Reveal cadence in milliseconds.
    #[arrrg(optional, "Milliseconds between reveal ticks (default: 40)", "MS")]
    pub cadence: Option<u32>,

    /// Path to the theme preference file.
    #[arrrg(optional, "Theme preference file path", "PATH")]
    pub prefs: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for the chat client.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Base URL of the chat backend.
    pub base_url: String,

    /// Timeout applied to every backend request.
    pub request_timeout: Duration,

    /// Delay between reveal ticks.
    pub reveal_cadence: Duration,

    /// Path of the persisted theme preference.
    pub prefs_path: PathBuf,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Base URL: http://localhost:8080/api/
    /// - Timeout: 60 seconds
    /// - Cadence: 40 milliseconds
    /// - Prefs: `.colloquy-theme.json` under the home directory
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            reveal_cadence: DEFAULT_CADENCE,
            prefs_path: default_prefs_path(),
            use_color: true,
        }
    }

    /// Sets the backend base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the reveal cadence.
    pub fn with_reveal_cadence(mut self, cadence: Duration) -> Self {
        self.reveal_cadence = cadence;
        self
    }

    /// Sets the theme preference path.
    pub fn with_prefs_path(mut self, path: PathBuf) -> Self {
        self.prefs_path = path;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let defaults = ChatConfig::new();
        ChatConfig {
            base_url: args.base_url.unwrap_or(defaults.base_url),
            request_timeout: args
                .timeout
                .map(|secs| Duration::from_secs(u64::from(secs)))
                .unwrap_or(defaults.request_timeout),
            reveal_cadence: args
                .cadence
                .map(|ms| Duration::from_millis(u64::from(ms)))
                .unwrap_or(defaults.reveal_cadence),
            prefs_path: args.prefs.map(PathBuf::from).unwrap_or(defaults.prefs_path),
            use_color: !args.no_color,
        }
    }
}

/// The well-known location of the theme preference.
fn default_prefs_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PREFS_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.base_url, "http://localhost:8080/api/");
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.reveal_cadence, Duration::from_millis(40));
        assert!(config.use_color);
        assert!(config.prefs_path.ends_with(".colloquy-theme.json"));
    }

    #[test]
    fn config_from_args_defaults() {
        let args = ChatArgs::default();
        let config = ChatConfig::from(args);
        assert_eq!(config.base_url, "http://localhost:8080/api/");
        assert_eq!(config.reveal_cadence, Duration::from_millis(40));
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            base_url: Some("http://example.com/api".to_string()),
            timeout: Some(5),
            cadence: Some(10),
            prefs: Some("/tmp/theme.json".to_string()),
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.base_url, "http://example.com/api");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.reveal_cadence, Duration::from_millis(10));
        assert_eq!(config.prefs_path, PathBuf::from("/tmp/theme.json"));
        assert!(!config.use_color);
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_base_url("http://example.com/api/")
            .with_request_timeout(Duration::from_secs(10))
            .with_reveal_cadence(Duration::from_millis(5))
            .with_prefs_path(PathBuf::from("theme.json"))
            .without_color();

        assert_eq!(config.base_url, "http://example.com/api/");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.reveal_cadence, Duration::from_millis(5));
        assert_eq!(config.prefs_path, PathBuf::from("theme.json"));
        assert!(!config.use_color);
    }
}
