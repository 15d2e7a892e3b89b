// Trailing query window and the timestamp formats used for archive bodies and object keys.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// Datapoint timestamps in archive bodies, e.g. `01/01/2024, 11:00:00`.
pub const DATAPOINT_TIMESTAMP_FORMAT: &str = "%m/%d/%Y, %H:%M:%S";

/// Window bounds in object keys, e.g. `01-01-2024_12-00-00`.
pub const KEY_TIMESTAMP_FORMAT: &str = "%m-%d-%Y_%H-%M-%S";

/// Fixed-width window `[start, end]` ending at the invocation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window of `duration` ending at `end`. None unless `duration` is positive, so `start < end` always holds.
    pub fn ending_at(end: DateTime<Utc>, duration: Duration) -> Option<Self> {
        if duration <= Duration::zero() {
            return None;
        }
        Some(Self {
            start: end - duration,
            end,
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%dT%H:%M:%SZ"),
            self.end.format("%Y-%m-%dT%H:%M:%SZ")
        )
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(DATAPOINT_TIMESTAMP_FORMAT).to_string()
}

pub fn format_key_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(KEY_TIMESTAMP_FORMAT).to_string()
}

/// Object key for one archived window: `<prefix>_<start>_<end>.json`.
/// Both bounds are fixed width, so distinct windows (at second granularity) never share a key.
pub fn archive_key(prefix: &str, window: &TimeWindow) -> String {
    format!(
        "{}_{}_{}.json",
        prefix,
        format_key_timestamp(window.start()),
        format_key_timestamp(window.end())
    )
}
