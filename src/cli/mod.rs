//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, logging setup,
//! the interactive session and the one-shot runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod logging;
pub mod messages;
pub mod presenter;
pub mod session_app;
pub mod terminal;

// Re-export commonly used types
pub use app::{run_oneshot, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, RunOptions, SessionOptions};
pub use presenter::Presenter;
pub use session_app::run_session;
