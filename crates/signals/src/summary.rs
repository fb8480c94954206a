//! Rolling statistical summary of a scalar indicator.
//!
//! Produces the mean, standard deviation, z-score, and "1 in N" rarity of the
//! current reading against a window of recent history.

use market_signal_core::TimeSeries;
use serde::{Deserialize, Serialize};

/// Default number of observations in the rolling window.
pub const DEFAULT_WINDOW: usize = 90;

/// Minimum |z| for which a rarity estimate is reported.
pub const RARITY_MIN_ZSCORE: f64 = 2.0;

/// Summary of the current value relative to its rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticalSummary {
    /// Arithmetic mean of the window
    pub mean: f64,
    /// Population standard deviation of the window
    pub standard_deviation: f64,
    /// The value being scored
    pub current_value: f64,
    /// Standard deviations between current value and mean (0 when flat)
    pub z_score: f64,
    /// Approximate "1 in N" occurrence, only when |z| >= 2
    pub rarity: Option<u64>,
}

impl StatisticalSummary {
    /// Summarizes `current` against an already windowed history.
    ///
    /// Uses the population standard deviation. A window with fewer than two
    /// values, or with no spread, yields a z-score of 0. An empty window uses
    /// the current value as its mean.
    #[must_use]
    pub fn compute(history: &[f64], current: f64) -> Self {
        let mean = if history.is_empty() {
            current
        } else {
            history.iter().sum::<f64>() / history.len() as f64
        };

        let standard_deviation = if history.len() < 2 {
            0.0
        } else {
            let variance = history.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                / history.len() as f64;
            variance.sqrt()
        };

        let z_score = if standard_deviation > f64::EPSILON && standard_deviation.is_finite() {
            (current - mean) / standard_deviation
        } else {
            0.0
        };

        Self {
            mean,
            standard_deviation,
            current_value: current,
            z_score,
            rarity: rarity_for_zscore(z_score),
        }
    }

    /// Summarizes the latest point of `series` against the `window`
    /// observations preceding it.
    ///
    /// Returns None for an empty series.
    #[must_use]
    pub fn from_series(series: &TimeSeries, window: usize) -> Option<Self> {
        let mut history = series.window(window.saturating_add(1));
        let current = history.pop()?;

        let summary = Self::compute(&history, current);
        tracing::debug!(
            window = history.len(),
            mean = summary.mean,
            z_score = summary.z_score,
            "computed statistical summary"
        );
        Some(summary)
    }

    /// Returns true if the reading is at least two standard deviations out.
    #[must_use]
    pub fn is_unusual(&self) -> bool {
        self.rarity.is_some()
    }
}

/// Converts a z-score into an approximate "1 in N" occurrence.
///
/// Uses the upper tail of the standard normal distribution. Returns None for
/// |z| < 2 and saturates at `u64::MAX` far out in the tail.
#[must_use]
pub fn rarity_for_zscore(z_score: f64) -> Option<u64> {
    let z = z_score.abs();
    if !z.is_finite() || z < RARITY_MIN_ZSCORE {
        return None;
    }

    let tail = standard_normal_upper_tail(z);
    if tail <= 0.0 {
        return Some(u64::MAX);
    }

    let one_in = 1.0 / tail;
    if one_in >= u64::MAX as f64 {
        Some(u64::MAX)
    } else {
        Some(one_in.round() as u64)
    }
}

/// Upper tail probability `1 - Φ(x)` for `x >= 0`.
///
/// Abramowitz and Stegun 26.2.17, evaluated on the tail directly so the
/// result keeps precision where `Φ(x)` rounds to 1.
fn standard_normal_upper_tail(x: f64) -> f64 {
    let b1 = 0.319_381_530;
    let b2 = -0.356_563_782;
    let b3 = 1.781_477_937;
    let b4 = -1.821_255_978;
    let b5 = 1.330_274_429;
    let p = 0.231_641_9;

    let t = 1.0 / (1.0 + p * x);
    let poly = t * (b1 + t * (b2 + t * (b3 + t * (b4 + t * b5))));

    let pdf = (-x * x / 2.0).exp() / (2.0 * std::f64::consts::PI).sqrt();
    pdf * poly
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use market_signal_core::TimeSeriesPoint;

    // ============================================
    // Z-score
    // ============================================

    #[test]
    fn constant_series_has_zero_zscore() {
        let history = vec![42.0; 90];
        let summary = StatisticalSummary::compute(&history, 42.0);
        assert_eq!(summary.z_score, 0.0);
        assert_eq!(summary.standard_deviation, 0.0);
        assert_eq!(summary.rarity, None);
    }

    #[test]
    fn flat_series_with_moved_current_still_zero() {
        let history = vec![10.0; 30];
        let summary = StatisticalSummary::compute(&history, 50.0);
        assert_eq!(summary.z_score, 0.0);
        assert!(!summary.z_score.is_nan());
    }

    #[test]
    fn single_point_window_is_degenerate() {
        let summary = StatisticalSummary::compute(&[5.0], 9.0);
        assert_eq!(summary.mean, 5.0);
        assert_eq!(summary.z_score, 0.0);
    }

    #[test]
    fn empty_window_uses_current_as_mean() {
        let summary = StatisticalSummary::compute(&[], 3.0);
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.z_score, 0.0);
        assert_eq!(summary.rarity, None);
    }

    #[test]
    fn uses_population_standard_deviation() {
        // mean 5, population variance 4
        let history = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let summary = StatisticalSummary::compute(&history, 9.0);
        assert!((summary.mean - 5.0).abs() < 1e-12);
        assert!((summary.standard_deviation - 2.0).abs() < 1e-12);
        assert!((summary.z_score - 2.0).abs() < 1e-12);
        assert_eq!(summary.rarity, Some(44));
    }

    #[test]
    fn negative_deviation_gives_negative_zscore() {
        let history = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let summary = StatisticalSummary::compute(&history, 1.0);
        assert!((summary.z_score + 2.0).abs() < 1e-12);
        assert_eq!(summary.rarity, Some(44));
    }

    // ============================================
    // Rarity
    // ============================================

    #[test]
    fn rarity_absent_below_two_sigma() {
        for z in [-1.99, -1.0, 0.0, 0.5, 1.5, 1.999] {
            assert_eq!(rarity_for_zscore(z), None, "z = {z}");
        }
    }

    #[test]
    fn rarity_magnitudes() {
        assert_eq!(rarity_for_zscore(2.0), Some(44));
        assert_eq!(rarity_for_zscore(3.0), Some(741));
        assert_eq!(rarity_for_zscore(-3.0), Some(741));
    }

    #[test]
    fn rarity_non_decreasing_in_abs_z() {
        let mut previous = 0;
        for i in 200..5000 {
            let z = f64::from(i) / 100.0;
            let rarity = rarity_for_zscore(z).unwrap();
            assert!(rarity >= previous, "rarity dropped at z = {z}");
            assert!(rarity > 0);
            previous = rarity;
        }
    }

    #[test]
    fn rarity_saturates_far_in_tail() {
        assert_eq!(rarity_for_zscore(60.0), Some(u64::MAX));
        assert_eq!(rarity_for_zscore(f64::INFINITY), None);
    }

    // ============================================
    // Series windowing
    // ============================================

    #[test]
    fn from_series_scores_latest_against_preceding_window() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let values = [100.0, 1.0, 3.0, 1.0, 3.0, 10.0];
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| TimeSeriesPoint::new(start + Duration::days(i as i64), v))
            .collect();
        let series = TimeSeries::new(points).unwrap();

        // window of 4 ignores the 100.0 outlier: mean 2, sd 1
        let summary = StatisticalSummary::from_series(&series, 4).unwrap();
        assert!((summary.mean - 2.0).abs() < 1e-12);
        assert!((summary.z_score - 8.0).abs() < 1e-12);
        assert_eq!(summary.current_value, 10.0);
    }

    #[test]
    fn from_series_with_single_point_has_no_history() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let series = TimeSeries::new(vec![TimeSeriesPoint::new(start, 7.0)]).unwrap();

        let summary = StatisticalSummary::from_series(&series, DEFAULT_WINDOW).unwrap();
        assert_eq!(summary.mean, 7.0);
        assert_eq!(summary.z_score, 0.0);
        assert!(!summary.is_unusual());
    }

    #[test]
    fn from_empty_series_is_none() {
        assert!(StatisticalSummary::from_series(&TimeSeries::default(), DEFAULT_WINDOW).is_none());
    }
}
