//! Observation records consumed by the forecast engine.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Output and canonical input format for timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw measurement channel of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    X,
    Y,
    Z,
}

impl Channel {
    /// All channels in feature column order.
    pub const ALL: [Channel; 3] = [Channel::X, Channel::Y, Channel::Z];

    pub fn name(&self) -> &'static str {
        match self {
            Channel::X => "x",
            Channel::Y => "y",
            Channel::Z => "z",
        }
    }
}

/// A single quality-inspection measurement.
///
/// `x`, `y` and `z` are raw signal channels nominally in `[0, 100]`; `score`
/// is the composite learning target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub t: NaiveDateTime,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub score: f64,
}

impl Observation {
    pub fn new(t: NaiveDateTime, x: f64, y: f64, z: f64, score: f64) -> Self {
        Self { t, x, y, z, score }
    }

    /// Value of the given raw channel.
    pub fn channel(&self, channel: Channel) -> f64 {
        match channel {
            Channel::X => self.x,
            Channel::Y => self.y,
            Channel::Z => self.z,
        }
    }
}

/// Timestamp as supplied by a dataset source: already typed, or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimestampInput {
    Parsed(NaiveDateTime),
    Text(String),
}

impl From<NaiveDateTime> for TimestampInput {
    fn from(t: NaiveDateTime) -> Self {
        TimestampInput::Parsed(t)
    }
}

impl From<&str> for TimestampInput {
    fn from(s: &str) -> Self {
        TimestampInput::Text(s.to_string())
    }
}

impl TimestampInput {
    /// Resolve into a naive wall-clock timestamp.
    pub fn resolve(&self) -> Option<NaiveDateTime> {
        match self {
            TimestampInput::Parsed(t) => Some(*t),
            TimestampInput::Text(s) => parse_timestamp(s),
        }
    }
}

/// An unvalidated record, e.g. deserialized from a request body.
///
/// Every field is optional; validation rejects records with gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    #[serde(default)]
    pub t: Option<TimestampInput>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub z: Option<f64>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl From<Observation> for RawObservation {
    fn from(obs: Observation) -> Self {
        Self {
            t: Some(TimestampInput::Parsed(obs.t)),
            x: Some(obs.x),
            y: Some(obs.y),
            z: Some(obs.z),
            score: Some(obs.score),
        }
    }
}

/// Parse a timestamp string.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, ISO 8601 with a `T` separator (fractional
/// seconds allowed), RFC 3339 with an offset (converted to UTC) and a bare
/// `YYYY-MM-DD` date (midnight).
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(t) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
        return Some(t);
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(t);
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(t);
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.naive_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(t: &NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}
