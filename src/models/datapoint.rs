// Datapoints as returned by the metrics reader, and their archive (JSON) form.

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::Statistic;
use super::window::format_timestamp;

/// One aggregated sample: the `statistic` value over the period starting at `timestamp`.
#[derive(Debug, Clone, PartialEq)]
pub struct Datapoint {
    pub timestamp: DateTime<Utc>,
    pub statistic: Statistic,
    pub value: f64,
    pub unit: String,
}

/// Archive form of a datapoint with a human-readable timestamp.
/// Serializes as `{"Timestamp": "MM/DD/YYYY, HH:MM:SS", "<Statistic>": value, "Unit": "..."}`,
/// keys in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedDatapoint {
    pub timestamp: String,
    pub statistic: Statistic,
    pub value: f64,
    pub unit: String,
}

impl From<&Datapoint> for FormattedDatapoint {
    fn from(dp: &Datapoint) -> Self {
        Self {
            timestamp: format_timestamp(dp.timestamp),
            statistic: dp.statistic,
            value: dp.value,
            unit: dp.unit.clone(),
        }
    }
}

impl Serialize for FormattedDatapoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("Timestamp", &self.timestamp)?;
        map.serialize_entry(self.statistic.as_str(), &self.value)?;
        map.serialize_entry("Unit", &self.unit)?;
        map.end()
    }
}
