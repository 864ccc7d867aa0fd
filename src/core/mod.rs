//! Core data structures for quality-score forecasting.

mod observation;
mod result;

pub use observation::{
    format_timestamp, parse_timestamp, Channel, Observation, RawObservation, TimestampInput,
    TIMESTAMP_FORMAT,
};
pub use result::{ForecastResult, ScoreSeries};
