//! Daily indicator time series.
//!
//! The data-fetch layer hands the engine one `TimeSeriesPoint` per observation
//! day, oldest first. `TimeSeries` validates that ordering once so every
//! downstream computation can rely on it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// A single observation of a scalar indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Observation date
    pub date: DateTime<Utc>,
    /// Observed value
    pub value: f64,
}

impl TimeSeriesPoint {
    /// Creates a new point.
    #[must_use]
    pub const fn new(date: DateTime<Utc>, value: f64) -> Self {
        Self { date, value }
    }
}

/// Ordered series of observations with strictly increasing dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    /// Builds a series from points ordered oldest to newest.
    ///
    /// # Errors
    /// Returns error if dates are not strictly increasing or a value is not finite.
    pub fn new(points: Vec<TimeSeriesPoint>) -> Result<Self, SeriesError> {
        for point in &points {
            if !point.value.is_finite() {
                return Err(SeriesError::NonFinite { date: point.date });
            }
        }
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::NonIncreasing {
                    previous: pair[0].date,
                    next: pair[1].date,
                });
            }
        }
        Ok(Self { points })
    }

    /// Returns the underlying points.
    #[must_use]
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the most recent observation.
    #[must_use]
    pub fn latest(&self) -> Option<&TimeSeriesPoint> {
        self.points.last()
    }

    /// Returns all values, oldest first.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Returns the values of the most recent `n` observations, oldest first.
    #[must_use]
    pub fn window(&self, n: usize) -> Vec<f64> {
        let start = self.points.len().saturating_sub(n);
        self.points[start..].iter().map(|p| p.value).collect()
    }

    /// Finds the observation closest to `date`.
    ///
    /// Sparse series are tolerated: the nearest point on either side wins,
    /// and an exact tie resolves to the earlier point.
    #[must_use]
    pub fn nearest(&self, date: DateTime<Utc>) -> Option<&TimeSeriesPoint> {
        let idx = self.points.partition_point(|p| p.date < date);
        let after = self.points.get(idx);
        let before = idx.checked_sub(1).and_then(|i| self.points.get(i));

        match (before, after) {
            (Some(b), Some(a)) => {
                if a.date - date < date - b.date {
                    Some(a)
                } else {
                    Some(b)
                }
            }
            (Some(b), None) => Some(b),
            (None, Some(a)) => Some(a),
            (None, None) => None,
        }
    }

    /// Percent change of the latest value against the observation nearest to
    /// `days` before it.
    ///
    /// Returns None with fewer than two points, when the base observation is
    /// the latest one itself, or when the base value is zero.
    #[must_use]
    pub fn percent_change_over(&self, days: i64) -> Option<f64> {
        if self.points.len() < 2 {
            return None;
        }
        let latest = self.latest()?;
        let base = self.nearest(latest.date - Duration::days(days))?;
        if base.date == latest.date || base.value.abs() < f64::EPSILON {
            return None;
        }
        Some((latest.value - base.value) / base.value * 100.0)
    }
}

impl<'de> Deserialize<'de> for TimeSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let points = Vec::<TimeSeriesPoint>::deserialize(deserializer)?;
        Self::new(points).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn series(values: &[(u32, f64)]) -> TimeSeries {
        TimeSeries::new(
            values
                .iter()
                .map(|&(d, v)| TimeSeriesPoint::new(day(d), v))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_non_increasing_dates() {
        let result = TimeSeries::new(vec![
            TimeSeriesPoint::new(day(2), 1.0),
            TimeSeriesPoint::new(day(2), 2.0),
        ]);
        assert!(matches!(result, Err(SeriesError::NonIncreasing { .. })));
    }

    #[test]
    fn rejects_nan_values() {
        let result = TimeSeries::new(vec![TimeSeriesPoint::new(day(1), f64::NAN)]);
        assert!(matches!(result, Err(SeriesError::NonFinite { .. })));
    }

    #[test]
    fn window_takes_most_recent_values() {
        let s = series(&[(1, 1.0), (2, 2.0), (3, 3.0), (4, 4.0)]);
        assert_eq!(s.window(2), vec![3.0, 4.0]);
        assert_eq!(s.window(10), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn nearest_tolerates_gaps() {
        let s = series(&[(1, 1.0), (5, 5.0), (20, 20.0)]);
        assert_eq!(s.nearest(day(4)).unwrap().value, 5.0);
        assert_eq!(s.nearest(day(11)).unwrap().value, 5.0);
        assert_eq!(s.nearest(day(28)).unwrap().value, 20.0);
    }

    #[test]
    fn nearest_tie_resolves_to_earlier_point() {
        let s = series(&[(1, 1.0), (5, 5.0)]);
        assert_eq!(s.nearest(day(3)).unwrap().value, 1.0);
    }

    #[test]
    fn nearest_on_empty_series_is_none() {
        assert!(TimeSeries::default().nearest(day(1)).is_none());
    }

    #[test]
    fn percent_change_uses_nearest_base() {
        let s = series(&[(1, 100.0), (10, 105.0), (31, 110.0)]);
        let change = s.percent_change_over(30).unwrap();
        assert!((change - 10.0).abs() < 1e-9);
    }

    #[test]
    fn percent_change_needs_two_points() {
        assert!(series(&[(1, 100.0)]).percent_change_over(30).is_none());
    }

    #[test]
    fn percent_change_with_zero_base_is_none() {
        let s = series(&[(1, 0.0), (2, 5.0)]);
        assert!(s.percent_change_over(1).is_none());
    }

    #[test]
    fn deserialize_validates_order() {
        let json = r#"[
            {"date": "2024-01-02T00:00:00Z", "value": 1.0},
            {"date": "2024-01-01T00:00:00Z", "value": 2.0}
        ]"#;
        assert!(serde_json::from_str::<TimeSeries>(json).is_err());
    }
}
