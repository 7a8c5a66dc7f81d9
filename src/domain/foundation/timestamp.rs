//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
///
/// Serializes as epoch milliseconds, matching the persisted session record
/// wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(#[serde(with = "chrono::serde::ts_milliseconds")] DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Creates a timestamp from epoch milliseconds.
    pub fn from_epoch_ms(ms: i64) -> Self {
        Self(Utc.timestamp_millis_opt(ms).single().unwrap_or_default())
    }

    /// Returns the timestamp as epoch milliseconds.
    pub fn as_epoch_ms(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the elapsed duration from this timestamp to `now`.
    ///
    /// Negative if this timestamp is in the future.
    pub fn age(&self, now: &Timestamp) -> Duration {
        now.0.signed_duration_since(self.0)
    }

    /// Creates a new timestamp by subtracting the specified number of seconds.
    pub fn minus_secs(&self, secs: i64) -> Self {
        Self(self.0 - Duration::seconds(secs))
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_ms_round_trips() {
        let ts = Timestamp::from_epoch_ms(1_700_000_000_123);
        assert_eq!(ts.as_epoch_ms(), 1_700_000_000_123);
    }

    #[test]
    fn serializes_as_epoch_milliseconds() {
        let ts = Timestamp::from_epoch_ms(1_700_000_000_123);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "1700000000123");
    }

    #[test]
    fn deserializes_from_epoch_milliseconds() {
        let ts: Timestamp = serde_json::from_str("1700000000123").unwrap();
        assert_eq!(ts.as_epoch_ms(), 1_700_000_000_123);
    }

    #[test]
    fn age_measures_elapsed_time() {
        let earlier = Timestamp::from_epoch_ms(1_000);
        let later = Timestamp::from_epoch_ms(61_000);
        assert_eq!(earlier.age(&later), Duration::seconds(60));
    }

    #[test]
    fn ordering_follows_time() {
        let earlier = Timestamp::from_epoch_ms(1_000);
        let later = Timestamp::from_epoch_ms(2_000);
        assert!(earlier.is_before(&later));
        assert!(later.is_after(&earlier));
        assert!(earlier < later);
    }

    #[test]
    fn minus_secs_moves_backwards() {
        let ts = Timestamp::from_epoch_ms(100_000);
        assert_eq!(ts.minus_secs(60).as_epoch_ms(), 40_000);
    }
}
