use crate::errors::{EngineError, EngineResult};
use crate::types::PricePath;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Prices of the ensemble and realized path restricted to their common timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPrices {
    pub ensemble: Vec<Vec<f64>>,
    pub realized: Vec<f64>,
}

/// Keep only timestamps present in the realized path and in every ensemble
/// member. Each path keeps its own time order.
pub fn align(ensemble: &[PricePath], realized: &PricePath) -> EngineResult<AlignedPrices> {
    if ensemble.is_empty() {
        return Err(EngineError::InvalidInput("empty ensemble".into()));
    }

    let realized_times: HashSet<DateTime<Utc>> = realized.points.iter().map(|p| p.time).collect();
    let common = ensemble.iter().fold(realized_times, |acc, member| {
        let member_times: HashSet<DateTime<Utc>> = member.points.iter().map(|p| p.time).collect();
        acc.intersection(&member_times).copied().collect()
    });

    let keep = |path: &PricePath| -> Vec<f64> {
        path.points
            .iter()
            .filter(|p| common.contains(&p.time))
            .map(|p| p.price)
            .collect()
    };

    let aligned = AlignedPrices {
        ensemble: ensemble.iter().map(&keep).collect(),
        realized: keep(realized),
    };

    if aligned.realized.len() != realized.len() {
        tracing::debug!(
            before = realized.len(),
            after = aligned.realized.len(),
            "realized path trimmed to common timestamps"
        );
    }

    Ok(aligned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PricePoint;
    use chrono::{Duration, TimeZone};

    fn path(start_minute: i64, prices: &[f64]) -> PricePath {
        let base = Utc.with_ymd_and_hms(2025, 3, 4, 13, 0, 0).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint::new(base + Duration::minutes(start_minute + 5 * i as i64), p))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_identical_grids_unchanged() {
        let realized = path(0, &[1.0, 2.0, 3.0]);
        let ensemble = vec![path(0, &[1.5, 2.5, 3.5]), path(0, &[0.5, 1.5, 2.5])];
        let aligned = align(&ensemble, &realized).unwrap();
        assert_eq!(aligned.realized, vec![1.0, 2.0, 3.0]);
        assert_eq!(aligned.ensemble[1], vec![0.5, 1.5, 2.5]);
    }

    #[test]
    fn test_realized_tail_missing_trims_ensemble() {
        // realized stops early: ensemble loses its last two points
        let realized = path(0, &[1.0, 2.0, 3.0]);
        let ensemble = vec![path(0, &[10.0, 20.0, 30.0, 40.0, 50.0])];
        let aligned = align(&ensemble, &realized).unwrap();
        assert_eq!(aligned.ensemble[0], vec![10.0, 20.0, 30.0]);
        assert_eq!(aligned.realized, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_offset_grids_keep_overlap_only() {
        let realized = path(0, &[1.0, 2.0, 3.0, 4.0]);
        let ensemble = vec![path(5, &[20.0, 30.0, 40.0, 50.0]), path(0, &[1.0, 2.0, 3.0, 4.0])];
        let aligned = align(&ensemble, &realized).unwrap();
        assert_eq!(aligned.realized, vec![2.0, 3.0, 4.0]);
        assert_eq!(aligned.ensemble[0], vec![20.0, 30.0, 40.0]);
        assert_eq!(aligned.ensemble[1], vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_empty_ensemble_rejected() {
        let realized = path(0, &[1.0]);
        assert!(matches!(align(&[], &realized), Err(EngineError::InvalidInput(_))));
    }
}
