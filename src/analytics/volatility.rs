use crate::errors::{EngineError, EngineResult};
use crate::types::PricePath;
use statrs::statistics::Statistics;

const SECONDS_PER_YEAR: f64 = 365.0 * 86_400.0;

/// Annualized realized volatility of a path.
///
/// sigma_annual = stdev(ln(p_i / p_{i-1})) * sqrt(periods_per_year)
///
/// Sample standard deviation (n - 1). A 365-day year at 300s sampling gives
/// 105120 periods.
pub fn annualized_volatility(path: &PricePath, time_increment: u64) -> EngineResult<f64> {
    if time_increment == 0 {
        return Err(EngineError::Configuration("time increment must be positive".into()));
    }
    if path.len() < 3 {
        return Err(EngineError::InvalidInput(format!(
            "volatility needs at least 3 prices, got {}",
            path.len()
        )));
    }

    let log_returns: Vec<f64> = path
        .points
        .windows(2)
        .map(|w| (w[1].price / w[0].price).ln())
        .collect();

    let periods_per_year = SECONDS_PER_YEAR / time_increment as f64;
    Ok(log_returns.iter().std_dev() * periods_per_year.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::convert::paths_from_prices;
    use chrono::{TimeZone, Utc};

    fn path(prices: Vec<f64>) -> PricePath {
        let start = Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap();
        paths_from_prices(&[prices], start, 300).unwrap().remove(0)
    }

    #[test]
    fn test_flat_path_has_zero_vol() {
        let vol = annualized_volatility(&path(vec![100.0; 10]), 300).unwrap();
        assert!(vol.abs() < 1e-12, "vol={vol}");
    }

    #[test]
    fn test_alternating_returns() {
        // log returns +r, -r, +r, -r
        let r: f64 = 0.01;
        let prices = vec![100.0, 100.0 * r.exp(), 100.0, 100.0 * r.exp(), 100.0];
        let vol = annualized_volatility(&path(prices), 300).unwrap();

        // sample stdev of [r, -r, r, -r] = r * sqrt(4/3)
        let expected = r * (4.0f64 / 3.0).sqrt() * 105_120f64.sqrt();
        assert!((vol - expected).abs() < 1e-9, "vol={vol} expected={expected}");
    }

    #[test]
    fn test_finer_sampling_scales_up() {
        let prices = vec![100.0, 101.0, 100.5, 102.0, 101.0];
        let coarse = annualized_volatility(&path(prices.clone()), 300).unwrap();
        let fine = annualized_volatility(&path(prices), 60).unwrap();
        assert!((fine / coarse - 5f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_too_short_path() {
        assert!(matches!(
            annualized_volatility(&path(vec![1.0, 2.0]), 300),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            annualized_volatility(&path(vec![1.0, 2.0, 3.0]), 0),
            Err(EngineError::Configuration(_))
        ));
    }
}
