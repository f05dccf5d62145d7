use crate::config::AppConfig;
use crate::errors::{EngineError, EngineResult};
use crate::paths::{paths_from_prices, PriceHistory};
use crate::types::PricePath;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;

/// Accepted layouts of an ensemble file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EnsembleInput {
    /// `[[{time, price}, ...], ...]`
    Timed(Vec<PricePath>),
    /// `{"predictions": [[{time, price}, ...], ...]}`, also accepted under `prediction`.
    Wrapped {
        #[serde(alias = "prediction")]
        predictions: Vec<PricePath>,
    },
    /// `{"start_time": "...", "predictions": [[f64, ...], ...]}`
    Raw {
        start_time: DateTime<Utc>,
        predictions: Vec<Vec<f64>>,
    },
}

impl EnsembleInput {
    pub fn into_paths(self, time_increment: u64) -> EngineResult<Vec<PricePath>> {
        match self {
            Self::Timed(paths) | Self::Wrapped { predictions: paths } => Ok(paths),
            Self::Raw {
                start_time,
                predictions,
            } => paths_from_prices(&predictions, start_time, time_increment),
        }
    }
}

/// Accepted layouts of a realized-price file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RealizedInput {
    Path(PricePath),
    History(PriceHistory),
}

impl RealizedInput {
    /// `stride` is only used for bar histories.
    pub fn into_path(self, stride: usize) -> EngineResult<PricePath> {
        match self {
            Self::Path(path) => Ok(path),
            Self::History(history) => history.to_path(stride),
        }
    }
}

pub fn read_ensemble(path: &Path, time_increment: u64) -> EngineResult<Vec<PricePath>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))?;
    let input: EnsembleInput = serde_json::from_str(&raw)
        .map_err(|e| EngineError::Parse(format!("{}: {e}", path.display())))?;
    input.into_paths(time_increment)
}

pub fn read_realized(path: &Path, stride: usize) -> EngineResult<PricePath> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))?;
    let input: RealizedInput = serde_json::from_str(&raw)
        .map_err(|e| EngineError::Parse(format!("{}: {e}", path.display())))?;
    input.into_path(stride)
}

/// Bars of history per realized sample.
pub fn history_stride(time_increment: u64, resolution_seconds: u64) -> EngineResult<usize> {
    if resolution_seconds == 0 {
        return Err(EngineError::Configuration("history resolution must be positive".into()));
    }
    match time_increment / resolution_seconds {
        0 => Err(EngineError::Configuration(format!(
            "time increment {time_increment}s is finer than the {resolution_seconds}s history resolution"
        ))),
        stride => Ok(stride as usize),
    }
}

/// Read both input files named by the config.
pub fn load(cfg: &AppConfig) -> EngineResult<(Vec<PricePath>, PricePath)> {
    let time_increment = cfg.scoring.time_increment;
    let stride = history_stride(time_increment, cfg.history_resolution_seconds)?;

    let ensemble = read_ensemble(&cfg.ensemble_path, time_increment)?;
    let realized = read_realized(&cfg.realized_path, stride)?;

    tracing::info!(
        members = ensemble.len(),
        realized_points = realized.len(),
        "inputs loaded"
    );
    Ok((ensemble, realized))
}
