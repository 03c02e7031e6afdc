//! Recording lengths and service timeouts

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Default microphone recording length for a dream (60 seconds)
pub const DEFAULT_RECORD_SECS: u64 = 60;

/// Default timeout for the image and emotion services (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const MS_PER_SEC: u64 = 1_000;
const MS_PER_MIN: u64 = 60 * MS_PER_SEC;
const MS_PER_HOUR: u64 = 60 * MS_PER_MIN;

/// A strictly positive span of time written like `45s`, `1m30s` or `1500ms`.
///
/// A bare number is read as seconds, so `record 20` records for twenty seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    millis: u64,
}

impl Duration {
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self::from_millis(secs * MS_PER_SEC)
    }

    /// Default microphone recording length
    pub const fn default_record() -> Self {
        Self::from_secs(DEFAULT_RECORD_SECS)
    }

    /// Default HTTP timeout for the image and emotion services
    pub const fn default_request_timeout() -> Self {
        Self::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    pub const fn as_secs(&self) -> u64 {
        self.millis / MS_PER_SEC
    }

    pub const fn as_millis(&self) -> u64 {
        self.millis
    }

    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.millis)
    }
}

fn unit_millis(unit: &str) -> Option<u64> {
    match unit {
        "ms" => Some(1),
        "" | "s" | "sec" | "secs" => Some(MS_PER_SEC),
        "m" | "min" | "mins" => Some(MS_PER_MIN),
        "h" => Some(MS_PER_HOUR),
        _ => None,
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DurationParseError {
            input: s.to_string(),
        };

        let input = s.trim().to_ascii_lowercase();
        let mut rest = input.as_str();
        if rest.is_empty() {
            return Err(invalid());
        }

        let mut total: u64 = 0;
        let mut bare_number_seen = false;
        while !rest.is_empty() {
            let digits_end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            if digits_end == 0 || bare_number_seen {
                return Err(invalid());
            }
            let (digits, tail) = rest.split_at(digits_end);
            let unit_end = tail
                .find(|c: char| c.is_ascii_digit())
                .unwrap_or(tail.len());
            let (unit, tail) = tail.split_at(unit_end);

            let amount: u64 = digits.parse().map_err(|_| invalid())?;
            let scale = unit_millis(unit).ok_or_else(invalid)?;
            bare_number_seen = unit.is_empty();

            total = amount
                .checked_mul(scale)
                .and_then(|ms| total.checked_add(ms))
                .ok_or_else(invalid)?;
            rest = tail;
        }

        match total {
            0 => Err(invalid()),
            millis => Ok(Self::from_millis(millis)),
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.millis / MS_PER_MIN;
        let seconds = (self.millis % MS_PER_MIN) / MS_PER_SEC;
        let millis = self.millis % MS_PER_SEC;

        if millis != 0 {
            return write!(f, "{}ms", self.millis);
        }
        match (minutes, seconds) {
            (0, s) => write!(f, "{}s", s),
            (m, 0) => write!(f, "{}m", m),
            (m, s) => write!(f, "{}m{}s", m, s),
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_record()
    }
}
