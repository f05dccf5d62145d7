use crate::config::{IntervalPolicy, ScoringInterval};
use crate::errors::{EngineError, EngineResult};

/// Number of samples spanned by a horizon: `floor(horizon / increment)`.
/// Zero when the horizon is shorter than one sample.
#[inline]
pub fn interval_steps(time_increment: u64, horizon_seconds: u64) -> EngineResult<usize> {
    if time_increment == 0 {
        return Err(EngineError::Configuration("time increment must be positive".into()));
    }
    usize::try_from(horizon_seconds / time_increment)
        .map_err(|e| EngineError::Configuration(format!("horizon {horizon_seconds}s: {e}")))
}

/// Step count for an interval, with the degenerate case resolved by `policy`.
///
/// Returns `Ok(None)` when the interval should be skipped.
pub fn resolve_steps(
    interval: &ScoringInterval,
    time_increment: u64,
    policy: IntervalPolicy,
) -> EngineResult<Option<usize>> {
    let steps = interval_steps(time_increment, interval.horizon_seconds)?;
    if steps >= 1 {
        return Ok(Some(steps));
    }

    match policy {
        IntervalPolicy::Strict => Err(EngineError::Configuration(format!(
            "interval '{}' ({}s) is shorter than the {}s sampling increment",
            interval.name, interval.horizon_seconds, time_increment
        ))),
        IntervalPolicy::Lenient => {
            tracing::warn!(
                interval = %interval.name,
                horizon_seconds = interval.horizon_seconds,
                time_increment,
                "interval shorter than sampling increment, skipping"
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_floor_division() {
        assert_eq!(interval_steps(300, 1800).unwrap(), 6);
        assert_eq!(interval_steps(300, 86400).unwrap(), 288);
        assert_eq!(interval_steps(60, 300).unwrap(), 5);
        assert_eq!(interval_steps(400, 1000).unwrap(), 2);
        assert_eq!(interval_steps(300, 299).unwrap(), 0);
    }

    #[test]
    fn test_zero_increment_is_config_error() {
        assert!(matches!(interval_steps(0, 300), Err(EngineError::Configuration(_))));
        let iv = ScoringInterval::new("5min", 300);
        assert!(matches!(
            resolve_steps(&iv, 0, IntervalPolicy::Lenient),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn test_strict_policy_rejects_short_horizon() {
        let iv = ScoringInterval::new("1min", 60);
        let err = resolve_steps(&iv, 300, IntervalPolicy::Strict).unwrap_err();
        match err {
            EngineError::Configuration(msg) => assert!(msg.contains("1min"), "msg={msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_lenient_policy_skips_short_horizon() {
        let iv = ScoringInterval::new("1min", 60);
        assert_eq!(resolve_steps(&iv, 300, IntervalPolicy::Lenient).unwrap(), None);
    }

    #[test]
    fn test_exact_one_step_is_scorable() {
        let iv = ScoringInterval::new("5min", 300);
        assert_eq!(resolve_steps(&iv, 300, IntervalPolicy::Strict).unwrap(), Some(1));
    }
}
