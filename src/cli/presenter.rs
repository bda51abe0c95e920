//! CLI presenter for output formatting

use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Kind of status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warn,
    Error,
}

impl Tone {
    fn mark(self) -> ColoredString {
        match self {
            Tone::Info => "ℹ".cyan(),
            Tone::Success => "✓".green(),
            Tone::Warn => "⚠".yellow(),
            Tone::Error => "✗".red(),
        }
    }
}

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    pub fn is_spinning(&self) -> bool {
        self.spinner.is_some()
    }

    /// Replace the spinner with a final status line
    pub fn finish_spinner(&mut self, tone: Tone, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", tone.mark(), message));
        }
    }

    pub fn spinner_success(&mut self, message: &str) {
        self.finish_spinner(Tone::Success, message);
    }

    pub fn spinner_fail(&mut self, message: &str) {
        self.finish_spinner(Tone::Error, message);
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print a status line to stderr
    pub fn status(&self, tone: Tone, message: &str) {
        eprintln!("{} {}", tone.mark(), message);
    }

    pub fn info(&self, message: &str) {
        self.status(Tone::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.status(Tone::Success, message);
    }

    pub fn warn(&self, message: &str) {
        self.status(Tone::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.status(Tone::Error, message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
