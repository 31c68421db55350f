use std::path::PathBuf;

use clap::Parser;

use spectrum_table::config::{ResolvedOutputs, TableConfig};
use spectrum_table::logging::init_logging;
use spectrum_table::runner::TableRunner;

/// Self-play harness for Spectrum tables.
#[derive(Debug, Parser)]
#[command(
    name = "spectrum-table",
    author,
    version,
    about = "Seeded Spectrum self-play through the table authority"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/table.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for deals and policies.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = TableConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.simulation.games = games;
    }

    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let seat_count = config.seats.len();
    let run_id = config.run_id.clone();
    let games = config.simulation.games;

    println!(
        "Loaded configuration '{run_id}' with {seat_count} seats ({games} game{})",
        if games == 1 { "" } else { "s" }
    );

    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = TableRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: no games played.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Run complete for '{run_id}': {} games, {} rounds -> {} rows at {}",
        summary.games_played,
        summary.rounds_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    for (seat, wins) in &summary.wins {
        println!("  {seat:<12} {wins} win{}", if *wins == 1 { "" } else { "s" });
    }
    println!();
    print!("{}", summary.final_standings);
    if let Some(guard) = logging_guard.as_ref() {
        println!("Structured log: {}", guard.log_path.display());
    }

    Ok(())
}
