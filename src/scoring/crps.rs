use crate::errors::{EngineError, EngineResult};
use smallvec::SmallVec;

/// Inline capacity for forecast scratch buffers. Typical ensembles are 100 paths.
pub(crate) const INLINE_ENSEMBLE: usize = 128;

pub(crate) type ForecastBuf = SmallVec<[f64; INLINE_ENSEMBLE]>;

/// Empirical-CDF CRPS of one observation against an ensemble of forecasts.
///
/// CRPS = (1/n) * sum_i (i/n - H_i)^2
///
/// where forecasts are sorted ascending, i is the 1-based rank and
/// H_i = 1 if observation <= f_(i), else 0.
///
/// This is the step-function approximation rankings have always been
/// computed with, not the pairwise-distance CRPS estimator. With every
/// forecast equal to the observation it evaluates to (n-1)(2n-1)/(6n^2),
/// not zero.
///
/// Pure function. Input order does not matter.
pub fn crps_ensemble(observation: f64, forecasts: &[f64]) -> EngineResult<f64> {
    if forecasts.is_empty() {
        return Err(EngineError::InvalidInput("empty ensemble".into()));
    }
    let mut sorted = ForecastBuf::from_slice(forecasts);
    Ok(crps_in_place(observation, &mut sorted))
}

/// Sorts `forecasts` and scores them. Caller guarantees a non-empty slice.
///
/// `total_cmp` gives NaN a fixed position (after +inf), so the result does
/// not depend on input order even for non-finite forecasts. Equal values are
/// interchangeable in the sum, so sort stability is irrelevant.
#[inline]
pub(crate) fn crps_in_place(observation: f64, forecasts: &mut [f64]) -> f64 {
    debug_assert!(!forecasts.is_empty());
    forecasts.sort_unstable_by(f64::total_cmp);

    let n = forecasts.len() as f64;
    let sum = forecasts
        .iter()
        .enumerate()
        .fold(0.0, |acc, (i, &forecast)| {
            let p = (i + 1) as f64 / n;
            let h = if observation <= forecast { 1.0 } else { 0.0 };
            acc + (p - h) * (p - h)
        });

    sum / n
}
