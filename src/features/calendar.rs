//! Calendar features derived from a timestamp.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Integer calendar attributes of a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFeatures {
    /// Day of year, 1-based (1..=366)
    pub day_of_year: u32,
    /// Day of week, Monday = 0 .. Sunday = 6
    pub day_of_week: u32,
    /// Hour of day (0..=23)
    pub hour: u32,
}

impl CalendarFeatures {
    pub fn from_timestamp(t: &NaiveDateTime) -> Self {
        Self {
            day_of_year: t.ordinal(),
            day_of_week: t.weekday().num_days_from_monday(),
            hour: t.hour(),
        }
    }
}
