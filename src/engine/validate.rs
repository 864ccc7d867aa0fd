//! Input validation and normalization.

use crate::core::{Observation, RawObservation};
use crate::error::{ForecastError, Result};

/// Check the requested horizon and convert it to a step count.
pub fn validate_horizon(horizon_days: i64) -> Result<usize> {
    if horizon_days < 1 {
        return Err(ForecastError::InvalidHorizon(horizon_days));
    }
    usize::try_from(horizon_days).map_err(|_| ForecastError::InvalidHorizon(horizon_days))
}

/// Copy and sort typed observations.
///
/// Non-finite channel or score values count as missing. Sorting is stable,
/// so rows sharing a timestamp keep their input order.
pub fn normalize_observations(history: &[Observation]) -> Result<Vec<Observation>> {
    if history.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    for (row, obs) in history.iter().enumerate() {
        for (field, value) in [
            ("x", obs.x),
            ("y", obs.y),
            ("z", obs.z),
            ("score", obs.score),
        ] {
            if !value.is_finite() {
                return Err(ForecastError::MissingField { field, row });
            }
        }
    }

    let mut sorted = history.to_vec();
    sorted.sort_by_key(|o| o.t);
    Ok(sorted)
}

/// Validate raw records, resolve their timestamps, and sort them.
///
/// Every row must carry every field. A single row with an absent or
/// non-finite value fails the whole call with
/// [`ForecastError::MissingField`]; partially filled columns are not
/// tolerated.
pub fn normalize_records(records: &[RawObservation]) -> Result<Vec<Observation>> {
    if records.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    let observations = records
        .iter()
        .enumerate()
        .map(|(row, raw)| {
            let t = match &raw.t {
                None => return Err(ForecastError::MissingField { field: "t", row }),
                Some(input) => input.resolve().ok_or_else(|| ForecastError::InvalidTimestamp {
                    row,
                    value: format!("{:?}", input),
                })?,
            };
            let field = |name: &'static str, value: Option<f64>| {
                value.ok_or(ForecastError::MissingField { field: name, row })
            };
            Ok(Observation::new(
                t,
                field("x", raw.x)?,
                field("y", raw.y)?,
                field("z", raw.z)?,
                field("score", raw.score)?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    normalize_observations(&observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimestampInput;
    use chrono::{NaiveDate, NaiveDateTime};

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn horizon_must_be_positive() {
        assert_eq!(validate_horizon(5), Ok(5));
        assert_eq!(validate_horizon(1), Ok(1));
        assert_eq!(validate_horizon(0), Err(ForecastError::InvalidHorizon(0)));
        assert_eq!(validate_horizon(-3), Err(ForecastError::InvalidHorizon(-3)));
    }

    #[test]
    fn observations_are_sorted_without_touching_input() {
        let input = vec![
            Observation::new(day(3), 3.0, 3.0, 3.0, 3.0),
            Observation::new(day(1), 1.0, 1.0, 1.0, 1.0),
            Observation::new(day(2), 2.0, 2.0, 2.0, 2.0),
        ];
        let sorted = normalize_observations(&input).unwrap();
        let scores: Vec<f64> = sorted.iter().map(|o| o.score).collect();
        assert_eq!(scores, vec![1.0, 2.0, 3.0]);
        assert_eq!(input[0].score, 3.0);
    }

    #[test]
    fn duplicate_timestamps_keep_input_order() {
        let input = vec![
            Observation::new(day(2), 0.0, 0.0, 0.0, 20.0),
            Observation::new(day(1), 0.0, 0.0, 0.0, 10.0),
            Observation::new(day(2), 0.0, 0.0, 0.0, 21.0),
        ];
        let sorted = normalize_observations(&input).unwrap();
        let scores: Vec<f64> = sorted.iter().map(|o| o.score).collect();
        assert_eq!(scores, vec![10.0, 20.0, 21.0]);
    }

    #[test]
    fn empty_and_non_finite_are_rejected() {
        assert_eq!(normalize_observations(&[]), Err(ForecastError::EmptyData));
        let bad = [Observation::new(day(1), 1.0, f64::NAN, 1.0, 1.0)];
        assert_eq!(
            normalize_observations(&bad),
            Err(ForecastError::MissingField { field: "y", row: 0 })
        );
    }

    #[test]
    fn raw_records_are_resolved_and_sorted() {
        let records = vec![
            RawObservation {
                t: Some(TimestampInput::from("2024-02-02 00:00:00")),
                x: Some(1.0),
                y: Some(2.0),
                z: Some(3.0),
                score: Some(2.1),
            },
            RawObservation::from(Observation::new(day(1), 4.0, 5.0, 6.0, 5.1)),
        ];
        let obs = normalize_records(&records).unwrap();
        assert_eq!(obs[0].t, day(1));
        assert_eq!(obs[1].t, day(2));
        assert_eq!(obs[1].z, 3.0);
    }

    #[test]
    fn raw_records_with_gaps_are_rejected() {
        let mut record = RawObservation::from(Observation::new(day(1), 1.0, 1.0, 1.0, 1.0));
        record.score = None;
        assert_eq!(
            normalize_records(&[record.clone()]),
            Err(ForecastError::MissingField {
                field: "score",
                row: 0
            })
        );

        record.score = Some(1.0);
        record.t = None;
        assert_eq!(
            normalize_records(&[record]),
            Err(ForecastError::MissingField { field: "t", row: 0 })
        );

        assert_eq!(normalize_records(&[]), Err(ForecastError::EmptyData));
    }

    #[test]
    fn unparseable_timestamp_is_rejected() {
        let record = RawObservation {
            t: Some(TimestampInput::from("not a date")),
            x: Some(1.0),
            y: Some(1.0),
            z: Some(1.0),
            score: Some(1.0),
        };
        let err = normalize_records(&[record]).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidTimestamp { row: 0, .. }));
        assert!(err.is_validation());
    }
}
