//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::dream::{DreamHistory, DreamRecord};

use super::messages::Messages;

/// Characters of transcription shown per history entry
pub const HISTORY_PREVIEW_CHARS: usize = 100;

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
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Output text to stdout without newline (used for input prompts)
    pub fn output_inline(&self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }

    /// Format recording progress bar
    pub fn format_progress(&self, elapsed_ms: u64, total_ms: u64) -> String {
        format_progress(elapsed_ms, total_ms)
    }

    /// Handle to the active spinner, for updates from a progress callback
    pub fn spinner_handle(&self) -> Option<ProgressBar> {
        self.spinner.clone()
    }

    /// Print one committed dream to stdout
    pub fn record(&self, record: &DreamRecord, messages: &Messages) {
        println!("{}", format_record(record, messages));
    }

    /// Print the dream history, most recent first
    pub fn history(&self, history: &DreamHistory, messages: &Messages) {
        if history.is_empty() {
            self.info(messages.empty_history());
            return;
        }
        println!("{}", format_history(history, messages));
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

/// Render a recording progress bar such as `[████░░░░] 3s / 10s`
pub fn format_progress(elapsed_ms: u64, total_ms: u64) -> String {
    let elapsed_secs = elapsed_ms / 1000;
    let total_secs = total_ms / 1000;
    let percent = if total_ms > 0 {
        (elapsed_ms as f64 / total_ms as f64 * 100.0).min(100.0)
    } else {
        0.0
    };

    let bar_width = 20;
    let filled = ((percent / 100.0) * bar_width as f64) as usize;
    let empty = bar_width - filled;

    format!(
        "[{}{}] {:>3}s / {}s",
        "█".repeat(filled).cyan(),
        "░".repeat(empty),
        elapsed_secs,
        total_secs
    )
}

/// Render one history entry
pub fn format_record(record: &DreamRecord, messages: &Messages) -> String {
    format!(
        "{} {}\n  {}: {}\n  {}: {}\n  {}: {}",
        messages.dream_of().bold(),
        record.timestamp().bold(),
        messages.transcription_label(),
        record.transcription_preview(HISTORY_PREVIEW_CHARS),
        messages.emotion_label(),
        record.emotion().display_in(messages.locale()),
        messages.image_label(),
        messages.yes_no(record.image_generated()),
    )
}

/// Render every history entry, most recent first
pub fn format_history(history: &DreamHistory, messages: &Messages) -> String {
    history
        .recent_first()
        .map(|record| format_record(record, messages))
        .collect::<Vec<_>>()
        .join("\n\n")
}
