use crate::errors::{EngineError, EngineResult};

/// Price change over each full, non-overlapping period of `interval_steps`
/// samples: `p[s] - p[0], p[2s] - p[s], ...` while the index stays in range.
///
/// Paths with `len <= interval_steps` yield an empty series.
pub fn change_series(prices: &[f64], interval_steps: usize) -> Vec<f64> {
    if interval_steps == 0 {
        return Vec::new();
    }

    let starts = prices.iter().step_by(interval_steps);
    let ends = prices.iter().skip(interval_steps).step_by(interval_steps);

    starts.zip(ends).map(|(from, to)| to - from).collect()
}

/// Like [`change_series`], but a path too short for a single full period is
/// an error instead of an empty series.
pub fn checked_change_series(prices: &[f64], interval_steps: usize) -> EngineResult<Vec<f64>> {
    if interval_steps == 0 {
        return Err(EngineError::InvalidInput("interval steps must be positive".into()));
    }
    if prices.len() <= interval_steps {
        return Err(EngineError::InvalidInput(format!(
            "path of {} points is too short for a {interval_steps}-step period",
            prices.len()
        )));
    }
    Ok(change_series(prices, interval_steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_step_is_first_difference() {
        let d = change_series(&[1.0, 3.0, 6.0, 10.0], 1);
        assert_eq!(d, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_non_overlapping_periods() {
        let prices: Vec<f64> = (0..10).map(|i| (i * i) as f64).collect();
        // indices 0, 3, 6, 9 -> 0, 9, 36, 81
        assert_eq!(change_series(&prices, 3), vec![9.0, 27.0, 45.0]);
    }

    #[test]
    fn test_trailing_partial_period_dropped() {
        let prices: Vec<f64> = (0..10).map(|i| i as f64).collect();
        // only index 6 fits; index 12 is out of range
        assert_eq!(change_series(&prices, 6), vec![6.0]);
    }

    #[test]
    fn test_short_path_is_empty() {
        assert!(change_series(&[1.0, 2.0, 3.0], 3).is_empty());
        assert!(change_series(&[1.0, 2.0, 3.0], 5).is_empty());
        assert!(change_series(&[], 1).is_empty());
    }

    #[test]
    fn test_checked_rejects_short_path() {
        assert!(matches!(
            checked_change_series(&[1.0, 2.0, 3.0], 3),
            Err(EngineError::InvalidInput(_))
        ));
        assert_eq!(checked_change_series(&[1.0, 2.0, 3.0, 5.0], 3).unwrap(), vec![4.0]);
    }

    #[test]
    fn test_series_length_matches_full_periods() {
        // 289 five-minute samples cover exactly one 24h period
        let prices = vec![1.0; 289];
        assert_eq!(change_series(&prices, 288).len(), 1);
        assert_eq!(change_series(&prices, 1).len(), 288);
        assert_eq!(change_series(&prices, 6).len(), 48);
    }
}
