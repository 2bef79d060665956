//! Minimum refresh interval.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use std::time::Duration;
use tidings_error::ConfigError;

/// Minimum time between two refreshes of the same resource, in seconds.
///
/// Always strictly positive; a zero interval is rejected on construction and
/// on deserialization.
///
/// # Example
///
/// ```
/// use tidings_cache::RefreshInterval;
///
/// assert_eq!(RefreshInterval::from_secs(60).unwrap().as_secs(), 60);
/// assert!(RefreshInterval::from_secs(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct RefreshInterval(NonZeroU64);

impl RefreshInterval {
    /// One minute.
    pub const MINUTE: Self = Self(NonZeroU64::MIN.saturating_add(59));

    /// One hour.
    pub const HOUR: Self = Self(NonZeroU64::MIN.saturating_add(3_599));

    /// One day.
    pub const DAY: Self = Self(NonZeroU64::MIN.saturating_add(86_399));

    /// Build an interval from a non-zero number of seconds.
    pub const fn from_nonzero(secs: NonZeroU64) -> Self {
        Self(secs)
    }

    /// Build an interval from whole seconds.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `secs` is zero.
    #[track_caller]
    pub fn from_secs(secs: u64) -> Result<Self, ConfigError> {
        NonZeroU64::new(secs)
            .map(Self)
            .ok_or_else(|| ConfigError::new("refresh interval must be greater than zero"))
    }

    /// Interval in seconds.
    pub fn as_secs(&self) -> u64 {
        self.0.get()
    }

    /// Interval as a `Duration`.
    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0.get())
    }
}

impl TryFrom<u64> for RefreshInterval {
    type Error = ConfigError;

    fn try_from(secs: u64) -> Result<Self, Self::Error> {
        Self::from_secs(secs)
    }
}

impl From<RefreshInterval> for u64 {
    fn from(interval: RefreshInterval) -> Self {
        interval.as_secs()
    }
}

impl TryFrom<Duration> for RefreshInterval {
    type Error = ConfigError;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        Self::from_secs(duration.as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_rejects_zero() {
        let parsed: Result<RefreshInterval, _> = serde_json::from_str("0");
        assert!(parsed.is_err());

        let parsed: RefreshInterval = serde_json::from_str("3600").unwrap();
        assert_eq!(parsed.as_duration(), Duration::from_secs(3600));
    }

    #[test]
    fn test_presets() {
        assert_eq!(RefreshInterval::MINUTE.as_secs(), 60);
        assert_eq!(RefreshInterval::HOUR.as_secs(), 3_600);
        assert_eq!(RefreshInterval::DAY.as_secs(), 86_400);
    }

    #[test]
    fn test_sub_second_duration_rejected() {
        assert!(RefreshInterval::try_from(Duration::from_millis(500)).is_err());
    }
}
