//! RTP simulator CLI
//!
//! Usage:
//!   rf-rtp-sim run [--config FILE] [--trials N] [--workers N] [--seed S] [--mode M] [--json]
//!   rf-rtp-sim tables [--mode M]
//!   rf-rtp-sim trial --seed S [--count N] [--mode M]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use rf_rtp_sim::{ReportFormat, SimConfig, Simulation};
use rf_slot_math::{GameMode, GameTables, SlotEngine};

#[derive(Parser)]
#[command(name = "rf-rtp-sim", about = "Monte Carlo RTP simulator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Normal,
    BuyBonus,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Normal => GameMode::Normal,
            ModeArg::BuyBonus => GameMode::BuyBonus,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and print the report
    Run {
        /// Run configuration (JSON or YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Trials per worker
        #[arg(short, long)]
        trials: Option<u64>,
        /// Worker count (default: logical cores)
        #[arg(short, long)]
        workers: Option<usize>,
        /// Master seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Play mode
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
        /// Progress log lines per worker
        #[arg(long)]
        progress: Option<u32>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Also write the report here (.txt, .json or .md)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the validated game tables as JSON
    Tables {
        #[arg(short, long, value_enum, default_value = "normal")]
        mode: ModeArg,
    },
    /// Play single trials with full free-spin history
    Trial {
        #[arg(short, long)]
        seed: u64,
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
        #[arg(short, long, value_enum, default_value = "normal")]
        mode: ModeArg,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            trials,
            workers,
            seed,
            mode,
            progress,
            json,
            output,
        } => {
            let mut run_config = match config {
                Some(path) => SimConfig::from_file(&path)
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => SimConfig::default(),
            };
            if let Some(trials) = trials {
                run_config = run_config.with_trials(trials);
            }
            if let Some(workers) = workers {
                run_config = run_config.with_workers(workers);
            }
            if let Some(seed) = seed {
                run_config = run_config.with_seed(seed);
            }
            if let Some(mode) = mode {
                run_config = run_config.with_mode(mode.into());
            }
            if let Some(steps) = progress {
                run_config = run_config.with_progress_steps(steps);
            }
            run_simulation(run_config, json, output)
        }
        Commands::Tables { mode } => print_tables(mode.into()),
        Commands::Trial { seed, count, mode } => play_trials(mode.into(), seed, count),
    }
}

fn run_simulation(config: SimConfig, json: bool, output: Option<PathBuf>) -> Result<()> {
    let simulation = Simulation::new(config).context("Invalid simulation setup")?;
    let report = simulation.run().context("Simulation failed")?;

    if json {
        println!("{}", report.to_json());
    } else {
        print!("{}", report.to_text());
    }

    if let Some(path) = output {
        report
            .save(&path, ReportFormat::from_path(&path))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Report written to {}", path.display());
    }
    Ok(())
}

fn print_tables(mode: GameMode) -> Result<()> {
    let tables = GameTables::for_mode(mode).context("Game tables failed validation")?;
    let json = serde_json::to_string_pretty(&tables).context("Failed to serialize tables")?;
    println!("{json}");
    Ok(())
}

fn play_trials(mode: GameMode, seed: u64, count: u32) -> Result<()> {
    let tables = Arc::new(GameTables::for_mode(mode).context("Game tables failed validation")?);
    let mut engine = SlotEngine::with_seed(tables, seed);

    for index in 0..count {
        let record = engine.play_trial_detailed();
        let o = &record.outcome;
        println!(
            "Trial {} (reel set {}, stops {:?})",
            index + 1,
            record.base_reel_set,
            record.base_screen.stops()
        );
        print!("{}", record.base_screen);
        println!(
            "  base {} | free {} | total {}{}",
            o.base_win,
            o.free_win,
            o.total_win,
            if o.capped { " (capped)" } else { "" }
        );
        for spin in &record.free_spins {
            println!(
                "  fs {:>3}: level {} x{:<3} left {:>3} stops {:?} scatters {} (cum {:>2}) win {}",
                spin.spin,
                spin.level,
                spin.multiplier,
                spin.spins_remaining,
                spin.stops,
                spin.scatters,
                spin.cumulative_scatters,
                spin.win
            );
        }
    }
    Ok(())
}
