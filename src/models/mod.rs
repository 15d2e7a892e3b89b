// Domain models: query, window, datapoints

mod datapoint;
mod query;
mod window;

pub use datapoint::{Datapoint, FormattedDatapoint};
pub use query::{Dimension, MetricQuery, Statistic};
pub use window::{
    DATAPOINT_TIMESTAMP_FORMAT, KEY_TIMESTAMP_FORMAT, TimeWindow, archive_key,
    format_key_timestamp, format_timestamp,
};
