use crate::errors::{EngineError, EngineResult};
use crate::types::PricePath;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Shape a submitted ensemble has to match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedEnsemble {
    pub num_simulations: usize,
    /// Seconds covered by each path.
    pub time_length: u64,
    pub time_increment: u64,
    pub start_time: DateTime<Utc>,
}

impl ExpectedEnsemble {
    /// Points per path, both ends included.
    pub fn points_per_path(&self) -> usize {
        (self.time_length / self.time_increment.max(1)) as usize + 1
    }
}

/// Reject an ensemble that does not match `expected`. The error message
/// names the first violation found.
pub fn validate_ensemble(ensemble: &[PricePath], expected: &ExpectedEnsemble) -> EngineResult<()> {
    if expected.time_increment == 0 {
        return Err(EngineError::Configuration("time increment must be positive".into()));
    }
    if ensemble.is_empty() {
        return Err(invalid("ensemble is empty".into()));
    }
    if ensemble.len() != expected.num_simulations {
        return Err(invalid(format!(
            "number of paths is incorrect: expected {}, got {}",
            expected.num_simulations,
            ensemble.len()
        )));
    }

    let points = expected.points_per_path();
    let step = i64::try_from(expected.time_increment)
        .map(Duration::seconds)
        .map_err(|e| EngineError::Configuration(format!("time increment {}: {e}", expected.time_increment)))?;

    ensemble.iter().enumerate().try_for_each(|(idx, path)| {
        if path.len() != points {
            return Err(invalid(format!(
                "path {idx}: number of time points is incorrect: expected {points}, got {}",
                path.len()
            )));
        }

        match path.start_time() {
            Some(start) if start == expected.start_time => {}
            Some(start) => {
                return Err(invalid(format!(
                    "path {idx}: start time is incorrect: expected {}, got {}",
                    expected.start_time.to_rfc3339(),
                    start.to_rfc3339()
                )))
            }
            None => return Err(invalid(format!("path {idx} is empty"))),
        }

        path.points.windows(2).try_for_each(|pair| {
            let delta = pair[1].time - pair[0].time;
            if delta == step {
                Ok(())
            } else {
                Err(invalid(format!(
                    "path {idx}: time increment is incorrect at {}: expected {}s, got {}s",
                    pair[1].time.to_rfc3339(),
                    step.num_seconds(),
                    delta.num_seconds()
                )))
            }
        })
    })
}

fn invalid(msg: String) -> EngineError {
    EngineError::InvalidInput(msg)
}
