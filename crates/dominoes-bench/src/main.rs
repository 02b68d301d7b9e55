use std::path::PathBuf;

use clap::Parser;

use dominoes_bench::config::{BenchConfig, ResolvedOutputs};
use dominoes_bench::logging::init_logging;
use dominoes_bench::tournament::TournamentRunner;

/// Tournament harness for dominoes move-ordering strategies.
#[derive(Debug, Parser)]
#[command(
    name = "dominoes-bench",
    author,
    version,
    about = "Deterministic partnership-dominoes tournament harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/dominoes.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of series to play.
    #[arg(long, value_name = "COUNT")]
    series: Option<usize>,

    /// Override the RNG seed for deals and sampling.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the cumulative score a partnership plays to.
    #[arg(long, value_name = "POINTS")]
    target_score: Option<u32>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(series) = cli.series {
        config.series.count = series;
    }

    if let Some(seed) = cli.seed {
        config.series.seed = Some(seed);
    }

    if let Some(target_score) = cli.target_score {
        config.series.target_score = target_score;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let series = config.series.count;
    let target_score = config.series.target_score;

    println!(
        "Loaded configuration '{run_id}': {series} series to {target_score} points, seats {}",
        config
            .agents
            .iter()
            .map(|agent| agent.name.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    );

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = TournamentRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: tournament execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Tournament complete for '{run_id}': {} series, {} games → {} rows at {}",
        summary.series_played,
        summary.games_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
