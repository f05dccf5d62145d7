/// Softmax temperature. Negative so that lower CRPS earns more weight.
pub const REWARD_BETA: f64 = -1.0 / 1000.0;

/// Reward weights over miner scores.
///
/// w_i = exp(beta * s_i) / sum_j exp(beta * s_j), over valid scores only.
///
/// `None` marks a miner without a valid score; it receives weight 0 and is
/// left out of the normalization. All-`None` input yields all zeros.
pub fn softmax_weights(scores: &[Option<f64>]) -> Vec<f64> {
    // Shift by the best score before exponentiating; the ratio is unchanged.
    let best = scores
        .iter()
        .flatten()
        .map(|&s| REWARD_BETA * s)
        .fold(f64::NEG_INFINITY, f64::max);

    if !best.is_finite() {
        return vec![0.0; scores.len()];
    }

    let exp: Vec<Option<f64>> = scores
        .iter()
        .map(|s| s.map(|s| (REWARD_BETA * s - best).exp()))
        .collect();
    let norm: f64 = exp.iter().flatten().sum();

    exp.into_iter()
        .map(|e| e.map_or(0.0, |e| e / norm))
        .collect()
}
