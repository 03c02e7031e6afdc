//! Image generation infrastructure module

mod clipdrop;

pub use clipdrop::{ClipdropImageSynthesizer, PROVIDER};
