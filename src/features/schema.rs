//! Feature columns, the two column schemas, and per-row feature values.

use super::calendar::CalendarFeatures;
use crate::core::Channel;
use crate::error::{ForecastError, Result};
use serde::Serialize;

/// A single feature column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureColumn {
    /// Raw channel value
    Channel(Channel),
    DayOfYear,
    DayOfWeek,
    Hour,
    /// Zero-based position in the sorted history
    TimeIndex,
    ScoreLag1,
    ScoreLag2,
    ChannelLag1(Channel),
    /// Trailing moving average of the score
    ScoreMovingAverage,
    /// Trailing moving average of a channel
    ChannelMovingAverage(Channel),
}

impl FeatureColumn {
    pub fn name(&self) -> &'static str {
        match self {
            FeatureColumn::Channel(c) => c.name(),
            FeatureColumn::DayOfYear => "day_of_year",
            FeatureColumn::DayOfWeek => "day_of_week",
            FeatureColumn::Hour => "hour",
            FeatureColumn::TimeIndex => "time_index",
            FeatureColumn::ScoreLag1 => "score_lag1",
            FeatureColumn::ScoreLag2 => "score_lag2",
            FeatureColumn::ChannelLag1(Channel::X) => "x_lag1",
            FeatureColumn::ChannelLag1(Channel::Y) => "y_lag1",
            FeatureColumn::ChannelLag1(Channel::Z) => "z_lag1",
            FeatureColumn::ScoreMovingAverage => "score_ma3",
            FeatureColumn::ChannelMovingAverage(Channel::X) => "x_ma3",
            FeatureColumn::ChannelMovingAverage(Channel::Y) => "y_ma3",
            FeatureColumn::ChannelMovingAverage(Channel::Z) => "z_ma3",
        }
    }
}

const BASIC_COLUMNS: [FeatureColumn; 7] = [
    FeatureColumn::Channel(Channel::X),
    FeatureColumn::Channel(Channel::Y),
    FeatureColumn::Channel(Channel::Z),
    FeatureColumn::DayOfYear,
    FeatureColumn::DayOfWeek,
    FeatureColumn::Hour,
    FeatureColumn::TimeIndex,
];

const AUTOREGRESSIVE_COLUMNS: [FeatureColumn; 16] = [
    FeatureColumn::Channel(Channel::X),
    FeatureColumn::Channel(Channel::Y),
    FeatureColumn::Channel(Channel::Z),
    FeatureColumn::DayOfYear,
    FeatureColumn::DayOfWeek,
    FeatureColumn::Hour,
    FeatureColumn::TimeIndex,
    FeatureColumn::ScoreLag1,
    FeatureColumn::ScoreLag2,
    FeatureColumn::ChannelLag1(Channel::X),
    FeatureColumn::ChannelLag1(Channel::Y),
    FeatureColumn::ChannelLag1(Channel::Z),
    FeatureColumn::ScoreMovingAverage,
    FeatureColumn::ChannelMovingAverage(Channel::X),
    FeatureColumn::ChannelMovingAverage(Channel::Y),
    FeatureColumn::ChannelMovingAverage(Channel::Z),
];

/// Column layout used for one engine call.
///
/// Selected once from the training data and applied unchanged to every
/// forecast step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeatureSchema {
    /// Raw channels, calendar and time index only.
    Basic,
    /// Basic columns plus lag and moving-average columns.
    Autoregressive,
}

impl FeatureSchema {
    pub fn columns(&self) -> &'static [FeatureColumn] {
        match self {
            FeatureSchema::Basic => &BASIC_COLUMNS,
            FeatureSchema::Autoregressive => &AUTOREGRESSIVE_COLUMNS,
        }
    }

    pub fn width(&self) -> usize {
        self.columns().len()
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns().iter().map(FeatureColumn::name).collect()
    }

    pub fn uses_lags(&self) -> bool {
        matches!(self, FeatureSchema::Autoregressive)
    }
}

/// Lag and moving-average inputs for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagFeatures {
    pub score_lag1: f64,
    pub score_lag2: f64,
    /// Previous value of each channel, indexed in [`Channel::ALL`] order
    pub channel_lag1: [f64; 3],
    pub score_ma: f64,
    /// Moving average of each channel, indexed in [`Channel::ALL`] order
    pub channel_ma: [f64; 3],
}

impl LagFeatures {
    fn is_complete(&self) -> bool {
        self.score_lag1.is_finite()
            && self.score_lag2.is_finite()
            && self.score_ma.is_finite()
            && self.channel_lag1.iter().all(|v| v.is_finite())
            && self.channel_ma.iter().all(|v| v.is_finite())
    }

    /// Keep only rows whose every lag input exists.
    pub(crate) fn complete(self) -> Option<Self> {
        self.is_complete().then_some(self)
    }
}

fn channel_slot(channel: Channel) -> usize {
    match channel {
        Channel::X => 0,
        Channel::Y => 1,
        Channel::Z => 2,
    }
}

/// All feature values for one (historical or future) row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// Channel values, indexed in [`Channel::ALL`] order
    pub channels: [f64; 3],
    pub calendar: CalendarFeatures,
    pub time_index: usize,
    pub lags: Option<LagFeatures>,
}

impl FeatureRow {
    /// Value of a column, or `None` when the row cannot supply it.
    pub fn value(&self, column: FeatureColumn) -> Option<f64> {
        match column {
            FeatureColumn::Channel(c) => Some(self.channels[channel_slot(c)]),
            FeatureColumn::DayOfYear => Some(f64::from(self.calendar.day_of_year)),
            FeatureColumn::DayOfWeek => Some(f64::from(self.calendar.day_of_week)),
            FeatureColumn::Hour => Some(f64::from(self.calendar.hour)),
            FeatureColumn::TimeIndex => Some(self.time_index as f64),
            FeatureColumn::ScoreLag1 => self.lags.map(|l| l.score_lag1),
            FeatureColumn::ScoreLag2 => self.lags.map(|l| l.score_lag2),
            FeatureColumn::ChannelLag1(c) => self.lags.map(|l| l.channel_lag1[channel_slot(c)]),
            FeatureColumn::ScoreMovingAverage => self.lags.map(|l| l.score_ma),
            FeatureColumn::ChannelMovingAverage(c) => {
                self.lags.map(|l| l.channel_ma[channel_slot(c)])
            }
        }
    }

    /// Build the feature vector in the schema's column order.
    pub fn assemble(&self, schema: FeatureSchema) -> Result<Vec<f64>> {
        schema
            .columns()
            .iter()
            .map(|&column| match self.value(column) {
                Some(v) if v.is_finite() => Ok(v),
                Some(v) => Err(ForecastError::FeatureAssembly(format!(
                    "column `{}` is not finite ({}) at time index {}",
                    column.name(),
                    v,
                    self.time_index
                ))),
                None => Err(ForecastError::FeatureAssembly(format!(
                    "column `{}` is unavailable at time index {}",
                    column.name(),
                    self.time_index
                ))),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn row(lags: Option<LagFeatures>) -> FeatureRow {
        FeatureRow {
            channels: [10.0, 20.0, 30.0],
            calendar: CalendarFeatures {
                day_of_year: 40,
                day_of_week: 2,
                hour: 8,
            },
            time_index: 5,
            lags,
        }
    }

    fn lags() -> LagFeatures {
        LagFeatures {
            score_lag1: 50.0,
            score_lag2: 48.0,
            channel_lag1: [9.0, 19.0, 29.0],
            score_ma: 49.0,
            channel_ma: [9.5, 19.5, 29.5],
        }
    }

    #[test]
    fn schemas_share_basic_prefix() {
        let basic = FeatureSchema::Basic.columns();
        let full = FeatureSchema::Autoregressive.columns();
        assert_eq!(basic.len(), 7);
        assert_eq!(full.len(), 16);
        assert_eq!(&full[..7], basic);
        assert!(!FeatureSchema::Basic.uses_lags());
        assert!(FeatureSchema::Autoregressive.uses_lags());
    }

    #[test]
    fn column_names_follow_layout() {
        assert_eq!(
            FeatureSchema::Autoregressive.column_names(),
            vec![
                "x", "y", "z", "day_of_year", "day_of_week", "hour", "time_index",
                "score_lag1", "score_lag2", "x_lag1", "y_lag1", "z_lag1",
                "score_ma3", "x_ma3", "y_ma3", "z_ma3",
            ]
        );
    }

    #[test]
    fn assemble_basic_row() {
        let values = row(None).assemble(FeatureSchema::Basic).unwrap();
        assert_eq!(values, vec![10.0, 20.0, 30.0, 40.0, 2.0, 8.0, 5.0]);
    }

    #[test]
    fn assemble_autoregressive_row() {
        let values = row(Some(lags()))
            .assemble(FeatureSchema::Autoregressive)
            .unwrap();
        assert_eq!(values.len(), 16);
        assert_eq!(
            &values[7..],
            &[50.0, 48.0, 9.0, 19.0, 29.0, 49.0, 9.5, 19.5, 29.5]
        );
    }

    #[test]
    fn missing_lags_fail_assembly() {
        let err = row(None)
            .assemble(FeatureSchema::Autoregressive)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FeatureAssembly);
        assert!(err.to_string().contains("score_lag1"));
    }

    #[test]
    fn non_finite_value_fails_assembly() {
        let mut bad = lags();
        bad.score_ma = f64::NAN;
        let err = row(Some(bad))
            .assemble(FeatureSchema::Autoregressive)
            .unwrap_err();
        assert!(err.to_string().contains("score_ma3"));
    }

    #[test]
    fn incomplete_lags_are_filtered() {
        assert!(lags().complete().is_some());
        let mut partial = lags();
        partial.score_lag2 = f64::NAN;
        assert!(partial.complete().is_none());
    }
}
