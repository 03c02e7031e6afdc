//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::domain::locale::Locale;

/// dream-synth - Turn a spoken dream into text, an illustration and an emotion
#[derive(Parser, Debug)]
#[command(name = "dream-synth")]
#[command(version)]
#[command(about = "Transcribe spoken dreams, illustrate them and classify their emotion")]
#[command(long_about = None)]
pub struct Cli {
    /// Interface language
    #[arg(long, value_name = "LOCALE", global = true)]
    pub locale: Option<LocaleArg>,

    /// Production mode: API keys must come from the environment or the secrets file
    #[arg(long, global = true)]
    pub production: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive dream session (default)
    Session {
        /// Audio file to load at startup (wav, mp3, m4a)
        #[arg(long, value_name = "FILE")]
        audio: Option<PathBuf>,
    },
    /// Transcribe, illustrate and classify one audio file
    Run {
        /// Audio file (wav, mp3, m4a)
        file: PathBuf,

        /// Skip image generation
        #[arg(long)]
        no_image: bool,

        /// Where to save the generated image
        #[arg(long, value_name = "PATH", conflicts_with = "no_image")]
        image_out: Option<PathBuf>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Locale argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LocaleArg {
    En,
    Fr,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::En => Locale::English,
            LocaleArg::Fr => Locale::French,
        }
    }
}

/// Options for the interactive session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub audio: Option<PathBuf>,
}

/// Options for the one-shot pipeline
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub file: PathBuf,
    pub generate_image: bool,
    pub image_out: Option<PathBuf>,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "locale",
    "transcription_model",
    "emotion_model",
    "request_timeout",
    "transcription_timeout",
    "record_duration",
    "output_dir",
    "secrets_path",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
