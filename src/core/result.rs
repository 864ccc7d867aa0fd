//! Forecast result structures keyed by formatted timestamps.

use super::observation::format_timestamp;
use chrono::NaiveDateTime;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A chronologically ordered sequence of timestamped scores.
///
/// Behaves like an insertion-ordered map keyed by `YYYY-MM-DD HH:MM:SS`
/// strings. Duplicate timestamps are kept as separate entries; key lookup
/// returns the first one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSeries {
    entries: Vec<(NaiveDateTime, f64)>,
}

impl ScoreSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, t: NaiveDateTime, score: f64) {
        self.entries.push((t, score));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(timestamp, score)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Formatted keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(|(t, _)| format_timestamp(t))
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.entries.iter().map(|(t, _)| *t).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    /// Look up a score by its formatted timestamp key.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(t, _)| format_timestamp(t) == key)
            .map(|(_, v)| *v)
    }


    pub fn last(&self) -> Option<(NaiveDateTime, f64)> {
        self.entries.last().copied()
    }

    pub fn min(&self) -> Option<f64> {
        self.entries.iter().map(|(_, v)| *v).reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.entries.iter().map(|(_, v)| *v).reduce(f64::max)
    }
}

impl Serialize for ScoreSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (t, v) in &self.entries {
            map.serialize_entry(&format_timestamp(t), v)?;
        }
        map.end()
    }
}

/// Historical scores and forecast scores on the same keyed format.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastResult {
    pub history: ScoreSeries,
    pub forecast: ScoreSeries,
}

impl ForecastResult {
    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.forecast.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn series_preserves_insertion_order_and_duplicates() {
        let mut series = ScoreSeries::new();
        series.push(day(1), 10.0);
        series.push(day(2), 20.0);
        series.push(day(2), 25.0);

        assert_eq!(series.len(), 3);
        assert_eq!(series.values(), vec![10.0, 20.0, 25.0]);
        assert_eq!(series.get("2024-05-02 09:00:00"), Some(20.0));
        assert_eq!(series.get("2024-05-03 09:00:00"), None);
        assert_eq!(series.last(), Some((day(2), 25.0)));
        assert_eq!(series.min(), Some(10.0));
        assert_eq!(series.max(), Some(25.0));
    }

    #[test]
    fn empty_series_has_no_extrema() {
        let series = ScoreSeries::new();
        assert!(series.is_empty());
        assert_eq!(series.min(), None);
        assert_eq!(series.last(), None);
    }

    #[test]
    fn result_serializes_as_ordered_maps() {
        let mut history = ScoreSeries::new();
        history.push(day(2), 41.5);
        history.push(day(1), 40.0);
        let mut forecast = ScoreSeries::new();
        forecast.push(day(3), 42.25);

        let result = ForecastResult { history, forecast };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"history":{"2024-05-02 09:00:00":41.5,"2024-05-01 09:00:00":40.0},"forecast":{"2024-05-03 09:00:00":42.25}}"#
        );
        assert_eq!(result.horizon(), 1);
    }
}
