use crps_scorer::config::AppConfig;
use crps_scorer::errors::EngineResult;
use crps_scorer::{analytics, input, paths, scoring};
use std::io::Write;

fn main() {
    // Structured logging on stderr; stdout carries the score JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        time_increment = cfg.scoring.time_increment,
        intervals = cfg.scoring.intervals.len(),
        policy = %cfg.scoring.policy,
        "crps_scorer starting"
    );

    if let Err(e) = run(&cfg) {
        tracing::error!("scoring failed: {e}");
        std::process::exit(1);
    }
}

fn run(cfg: &AppConfig) -> EngineResult<()> {
    let (ensemble, realized) = input::load(cfg)?;
    let aligned = paths::align(&ensemble, &realized)?;

    match analytics::annualized_volatility(&realized, cfg.scoring.time_increment) {
        Ok(vol) => tracing::info!(realized_volatility = vol, "realized path loaded"),
        Err(e) => tracing::debug!("realized volatility unavailable: {e}"),
    }

    let result = scoring::score_prices(&aligned.ensemble, &aligned.realized, &cfg.scoring)?;
    tracing::info!(
        total_score = result.total_score,
        rows = result.detailed_scores.len(),
        "scoring complete"
    );

    let json = serde_json::to_string_pretty(&result)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
