use crate::errors::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Sampling increment of the default scoring setup (5-minute bars).
pub const DEFAULT_TIME_INCREMENT: u64 = 300;

const DEFAULT_INTERVALS: &str = "5min=300,30min=1800,3hour=10800,24hour=86400";

/// A named look-ahead horizon over which price changes are scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringInterval {
    pub name: String,
    pub horizon_seconds: u64,
}

impl ScoringInterval {
    pub fn new(name: impl Into<String>, horizon_seconds: u64) -> Self {
        Self {
            name: name.into(),
            horizon_seconds,
        }
    }

    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("5min", 300),
            Self::new("30min", 1800),
            Self::new("3hour", 10800),
            Self::new("24hour", 86400),
        ]
    }
}

impl FromStr for ScoringInterval {
    type Err = EngineError;

    /// Parses `name=seconds`, e.g. `30min=1800`.
    fn from_str(s: &str) -> EngineResult<Self> {
        let (name, secs) = s
            .split_once('=')
            .ok_or_else(|| EngineError::Configuration(format!("interval '{s}': expected name=seconds")))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::Configuration(format!("interval '{s}': empty name")));
        }
        let horizon_seconds = secs
            .trim()
            .parse::<u64>()
            .map_err(|e| EngineError::Configuration(format!("interval '{name}': {e}")))?;
        if horizon_seconds == 0 {
            return Err(EngineError::Configuration(format!(
                "interval '{name}': horizon must be positive"
            )));
        }
        Ok(Self::new(name, horizon_seconds))
    }
}

/// Comma-separated, order-preserving list of `name=seconds` pairs.
pub fn parse_intervals(s: &str) -> EngineResult<Vec<ScoringInterval>> {
    let intervals = s
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ScoringInterval::from_str)
        .collect::<EngineResult<Vec<_>>>()?;

    if intervals.is_empty() {
        return Err(EngineError::Configuration("no scoring intervals configured".into()));
    }
    Ok(intervals)
}

/// What to do with an interval shorter than one sampling increment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalPolicy {
    /// Fail the whole scoring call.
    #[default]
    Strict,
    /// Drop the interval from the result and keep scoring the rest.
    Lenient,
}

impl std::fmt::Display for IntervalPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lenient => write!(f, "lenient"),
        }
    }
}

impl FromStr for IntervalPolicy {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(EngineError::Configuration(format!(
                "unknown interval policy: {other} (expected strict|lenient)"
            ))),
        }
    }
}

/// Everything the aggregator needs besides the paths themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub time_increment: u64,
    pub intervals: Vec<ScoringInterval>,
    #[serde(default)]
    pub policy: IntervalPolicy,
}

impl ScoringConfig {
    pub fn new(time_increment: u64, intervals: Vec<ScoringInterval>) -> Self {
        Self {
            time_increment,
            intervals,
            policy: IntervalPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: IntervalPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_INCREMENT, ScoringInterval::defaults())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ensemble_path: PathBuf,
    pub realized_path: PathBuf,
    pub scoring: ScoringConfig,
    pub history_resolution_seconds: u64,
}

impl AppConfig {
    pub fn from_env() -> EngineResult<Self> {
        dotenvy::dotenv().ok();

        let time_increment = env_var_or("TIME_INCREMENT", "300")
            .parse::<u64>()
            .map_err(|e| EngineError::Configuration(format!("TIME_INCREMENT: {e}")))?;

        let intervals = parse_intervals(&env_var_or("SCORING_INTERVALS", DEFAULT_INTERVALS))?;

        let policy = env_var_or("INTERVAL_POLICY", "strict").parse::<IntervalPolicy>()?;

        let history_resolution_seconds = env_var_or("HISTORY_RESOLUTION_SECONDS", "60")
            .parse::<u64>()
            .map_err(|e| EngineError::Configuration(format!("HISTORY_RESOLUTION_SECONDS: {e}")))?;

        Ok(Self {
            ensemble_path: PathBuf::from(env_var("SCORE_ENSEMBLE_PATH")?),
            realized_path: PathBuf::from(env_var("SCORE_REALIZED_PATH")?),
            scoring: ScoringConfig::new(time_increment, intervals).with_policy(policy),
            history_resolution_seconds,
        })
    }
}

fn env_var(key: &str) -> EngineResult<String> {
    std::env::var(key).map_err(|_| EngineError::Configuration(format!("missing env var: {key}")))
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
