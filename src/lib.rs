//! dream-synth - Dream journaling from the terminal
//!
//! Turns a spoken dream into text with Groq Whisper, illustrates it with
//! Clipdrop and classifies its dominant emotion with Mistral. Dreams whose
//! emotion was analyzed are kept in an in-memory history.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Dream session state machine, value objects, locale and errors
//! - **Application**: Orchestrator, credential resolution and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Groq, Clipdrop, Mistral, cpal, TOML files)
//! - **CLI**: Command-line interface, interactive session and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
