//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction so the reveal
//! loop and the REPL can print through the same seam. The default
//! implementation writes to stdout with optional ANSI styling.

use std::io::{self, Stdout, Write};

/// ANSI escape code for dim text (used for statuses and word counts).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for informational messages).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies: plain text
/// with ANSI styling, plain text without styling (for piping/redirecting),
/// or a capture renderer in tests.
pub trait Renderer: Send {
    /// Print a chunk of response text.
    ///
    /// This is called incrementally as the reveal progresses; no newline is
    /// appended.
    fn print_text(&mut self, text: &str);

    /// Called when a response is complete.
    ///
    /// Used to ensure proper newlines and cleanup after a reveal.
    fn finish_response(&mut self);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print a transient status line that the next output replaces.
    fn print_status(&mut self, status: &str);

    /// Erase the current transient status line, if any.
    fn clear_status(&mut self);
}

/// Counts whitespace-delimited words in a message body.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
    status_len: usize,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            use_color: true,
            status_len: 0,
        }
    }

    /// Creates a new PlainTextRenderer with the specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
            status_len: 0,
        }
    }

    /// Flushes stdout to ensure immediate display of revealed content.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_text(&mut self, text: &str) {
        self.clear_status();
        print!("{text}");
        self.flush();
    }

    fn finish_response(&mut self) {
        self.clear_status();
        println!();
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        self.clear_status();
        if self.use_color {
            println!("{ANSI_CYAN}{info}{ANSI_RESET}");
        } else {
            println!("{info}");
        }
    }

    fn print_error(&mut self, error: &str) {
        self.clear_status();
        if self.use_color {
            println!("{ANSI_RED}{error}{ANSI_RESET}");
        } else {
            println!("{error}");
        }
    }

    fn print_status(&mut self, status: &str) {
        self.clear_status();
        if self.use_color {
            print!("{ANSI_DIM}{status}{ANSI_RESET}");
        } else {
            print!("{status}");
        }
        self.status_len = status.len();
        self.flush();
    }

    fn clear_status(&mut self) {
        if self.status_len > 0 {
            print!("\r{}\r", " ".repeat(self.status_len));
            self.status_len = 0;
            self.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_basics() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("  spaced   out  "), 2);
        assert_eq!(word_count("a\nb\tc"), 3);
    }
}
