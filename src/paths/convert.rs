use crate::errors::{EngineError, EngineResult};
use crate::types::{PricePath, PricePoint};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Attach timestamps to raw simulated prices: point `i` of every member is
/// stamped `start_time + i * time_increment`.
pub fn paths_from_prices<P: AsRef<[f64]>>(
    prices: &[P],
    start_time: DateTime<Utc>,
    time_increment: u64,
) -> EngineResult<Vec<PricePath>> {
    let step = i64::try_from(time_increment)
        .map_err(|e| EngineError::Configuration(format!("time increment {time_increment}: {e}")))?;

    Ok(prices
        .iter()
        .map(|member| {
            PricePath::new(
                member
                    .as_ref()
                    .iter()
                    .enumerate()
                    .map(|(i, &price)| PricePoint::new(start_time + Duration::seconds(step * i as i64), price))
                    .collect(),
            )
        })
        .collect())
}

/// Bar history as returned by charting history endpoints: parallel arrays of
/// unix timestamps (`t`) and close prices (`c`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub t: Vec<i64>,
    pub c: Vec<f64>,
}

impl PriceHistory {
    /// Sample every `stride`-th bar, anchored on the latest bar, in time order.
    ///
    /// Anchoring at the end means the most recent close is always included
    /// and the first sample may be later than the first bar.
    pub fn to_path(&self, stride: usize) -> EngineResult<PricePath> {
        if stride == 0 {
            return Err(EngineError::Configuration("history stride must be positive".into()));
        }
        if self.t.len() != self.c.len() {
            return Err(EngineError::InvalidInput(format!(
                "history has {} timestamps but {} closes",
                self.t.len(),
                self.c.len()
            )));
        }

        let mut points = (0..self.t.len())
            .rev()
            .step_by(stride)
            .map(|i| {
                DateTime::from_timestamp(self.t[i], 0)
                    .map(|time| PricePoint::new(time, self.c[i]))
                    .ok_or_else(|| EngineError::InvalidInput(format!("timestamp out of range: {}", self.t[i])))
            })
            .collect::<EngineResult<Vec<_>>>()?;
        points.reverse();

        Ok(PricePath::new(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_paths_from_prices_stamps_each_member() {
        let start = Utc.with_ymd_and_hms(2025, 3, 4, 13, 51, 0).unwrap();
        let paths = paths_from_prices(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0]], start, 300).unwrap();

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].points[2].time, start + Duration::seconds(600));
        assert_eq!(paths[0].points[2].price, 3.0);
        assert_eq!(paths[1].len(), 2);
        assert_eq!(paths[1].start_time(), Some(start));
    }

    #[test]
    fn test_history_sampled_from_latest_bar() {
        let history = PriceHistory {
            t: (0..11).map(|i| 1_700_000_000 + 60 * i).collect(),
            c: (0..11).map(|i| i as f64).collect(),
        };
        let path = history.to_path(5).unwrap();

        assert_eq!(path.prices(), vec![0.0, 5.0, 10.0]);
        assert_eq!(path.points[2].time.timestamp(), 1_700_000_600);
    }

    #[test]
    fn test_history_uneven_length_drops_earliest_bars() {
        let history = PriceHistory {
            t: (0..8).map(|i| 1_700_000_000 + 60 * i).collect(),
            c: (0..8).map(|i| i as f64).collect(),
        };
        // indices 7, 2 -> reversed to 2, 7
        assert_eq!(history.to_path(5).unwrap().prices(), vec![2.0, 7.0]);
    }

    #[test]
    fn test_empty_history_is_empty_path() {
        assert!(PriceHistory::default().to_path(5).unwrap().is_empty());
    }

    #[test]
    fn test_history_errors() {
        let history = PriceHistory {
            t: vec![1, 2, 3],
            c: vec![1.0],
        };
        assert!(matches!(history.to_path(1), Err(EngineError::InvalidInput(_))));
        assert!(matches!(PriceHistory::default().to_path(0), Err(EngineError::Configuration(_))));
    }
}
