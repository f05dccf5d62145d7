//! Continuous Ranked Probability Score evaluation of simulated price-path
//! ensembles against a realized price path.
//!
//! The scoring modules are pure: they take typed paths and a
//! [`ScoringConfig`] and return a [`ScoreResult`]. Only [`input`] touches
//! the filesystem.

pub mod analytics;
pub mod config;
pub mod errors;
pub mod input;
pub mod paths;
pub mod scoring;
pub mod types;

pub use config::{IntervalPolicy, ScoringConfig, ScoringInterval};
pub use errors::{EngineError, EngineResult};
pub use scoring::{crps_ensemble, score_ensemble, score_prices};
pub use types::{DetailedScoreEntry, Increment, PricePath, PricePoint, ScoreResult};
