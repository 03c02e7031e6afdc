//! Recording domain module

mod duration;

pub use duration::{Duration, DEFAULT_RECORD_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
