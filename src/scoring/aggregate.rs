use crate::config::{IntervalPolicy, ScoringConfig, ScoringInterval};
use crate::errors::{EngineError, EngineResult};
use crate::scoring::changes::{change_series, checked_change_series};
use crate::scoring::crps::{crps_in_place, ForecastBuf};
use crate::scoring::intervals::resolve_steps;
use crate::types::{DetailedScoreEntry, Increment, PricePath, ScoreResult};
use rayon::prelude::*;

/// Scores of one interval, in increment order.
#[derive(Debug)]
struct IntervalScore {
    name: String,
    increments: Vec<f64>,
    subtotal: f64,
}

impl IntervalScore {
    /// Increment rows followed by the interval's "Total" row.
    fn into_entries(self) -> impl Iterator<Item = DetailedScoreEntry> {
        let Self {
            name,
            increments,
            subtotal,
        } = self;
        let total = DetailedScoreEntry {
            interval: name.clone(),
            increment: Increment::Total,
            crps: subtotal,
        };

        increments
            .into_iter()
            .enumerate()
            .map(move |(t, crps)| DetailedScoreEntry {
                interval: name.clone(),
                increment: Increment::Step(t + 1),
                crps,
            })
            .chain(std::iter::once(total))
    }
}

/// Score timestamped paths. Only the prices are used; the paths are assumed
/// to share start time and increment (see `paths::align`).
pub fn score_ensemble(
    ensemble: &[PricePath],
    realized: &PricePath,
    config: &ScoringConfig,
) -> EngineResult<ScoreResult> {
    let members: Vec<Vec<f64>> = ensemble.iter().map(PricePath::prices).collect();
    score_prices(&members, &realized.prices(), config)
}

/// Total CRPS of an ensemble against the realized prices over every
/// configured interval, plus the per-increment breakdown.
///
/// Detail rows are interval-major in declaration order, increment-ascending
/// within an interval, each block closed by its "Total" row. Ensemble members
/// of different lengths are truncated to the shortest change series.
///
/// Intervals are scored in parallel; the fold over their results runs in
/// declaration order, so the output is identical to a sequential run.
pub fn score_prices<P>(
    ensemble: &[P],
    realized: &[f64],
    config: &ScoringConfig,
) -> EngineResult<ScoreResult>
where
    P: AsRef<[f64]> + Sync,
{
    if ensemble.is_empty() {
        return Err(EngineError::InvalidInput("empty ensemble".into()));
    }

    let results: Vec<EngineResult<Option<IntervalScore>>> = config
        .intervals
        .par_iter()
        .map(|interval| score_interval(interval, ensemble, realized, config))
        .collect();

    // Sequential collect so the reported error is the first in declaration order.
    let blocks: Vec<IntervalScore> = results
        .into_iter()
        .collect::<EngineResult<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect();

    // Explicit +0.0 seed: an empty f64 `sum()` is -0.0, which would leak into the JSON.
    let total_score = blocks.iter().fold(0.0, |acc, b| acc + b.subtotal);
    let scored_intervals = blocks.len();
    let detailed_scores = blocks.into_iter().flat_map(IntervalScore::into_entries).collect();

    tracing::debug!(
        total_score,
        intervals = scored_intervals,
        members = ensemble.len(),
        "ensemble scored"
    );

    Ok(ScoreResult {
        total_score,
        detailed_scores,
    })
}

fn score_interval<P>(
    interval: &ScoringInterval,
    ensemble: &[P],
    realized: &[f64],
    config: &ScoringConfig,
) -> EngineResult<Option<IntervalScore>>
where
    P: AsRef<[f64]>,
{
    let Some(steps) = resolve_steps(interval, config.time_increment, config.policy)? else {
        return Ok(None);
    };

    let realized_changes = match config.policy {
        IntervalPolicy::Strict => checked_change_series(realized, steps).map_err(|e| match e {
            EngineError::InvalidInput(msg) => {
                EngineError::InvalidInput(format!("realized path, interval '{}': {msg}", interval.name))
            }
            other => other,
        })?,
        IntervalPolicy::Lenient => change_series(realized, steps),
    };

    // Members are truncated to the shortest series, but under the strict
    // policy every member must still cover one full period.
    let member_changes: Vec<Vec<f64>> = match config.policy {
        IntervalPolicy::Strict => ensemble
            .iter()
            .enumerate()
            .map(|(idx, member)| {
                checked_change_series(member.as_ref(), steps).map_err(|e| match e {
                    EngineError::InvalidInput(msg) => EngineError::InvalidInput(format!(
                        "ensemble member {idx}, interval '{}': {msg}",
                        interval.name
                    )),
                    other => other,
                })
            })
            .collect::<EngineResult<_>>()?,
        IntervalPolicy::Lenient => ensemble
            .iter()
            .map(|member| change_series(member.as_ref(), steps))
            .collect(),
    };

    let shortest_member = member_changes.iter().map(Vec::len).min().unwrap_or(0);
    let longest_member = member_changes.iter().map(Vec::len).max().unwrap_or(0);
    let num_increments = realized_changes.len().min(shortest_member);

    if shortest_member != longest_member || shortest_member != realized_changes.len() {
        tracing::warn!(
            interval = %interval.name,
            realized = realized_changes.len(),
            shortest_member,
            longest_member,
            scored = num_increments,
            "change series lengths differ, truncating to shortest"
        );
    }

    let increments: Vec<f64> = realized_changes[..num_increments]
        .iter()
        .enumerate()
        .map(|(t, &observation)| {
            let mut forecasts: ForecastBuf = member_changes.iter().map(|changes| changes[t]).collect();
            crps_in_place(observation, &mut forecasts)
        })
        .collect();

    let subtotal = increments.iter().fold(0.0, |acc, crps| acc + crps);

    tracing::debug!(
        interval = %interval.name,
        steps,
        increments = increments.len(),
        subtotal,
        "interval scored"
    );

    Ok(Some(IntervalScore {
        name: interval.name.clone(),
        increments,
        subtotal,
    }))
}
