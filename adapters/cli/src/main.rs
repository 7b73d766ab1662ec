#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Lucid run with a perfect observer.

mod config;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use lucid_core::GenerationError;
use lucid_system_bootstrap::Bootstrap;
use lucid_system_generation::Generator;
use lucid_system_progression::{Progression, Verdict};

use self::config::{Overrides, PolicyArg};
use self::report::{Ending, RunSummary, StageRecord};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// One line per stage
    Console,
    /// Full run summary as JSON
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "lucid", version)]
#[command(about = "Plays a Lucid run where every verdict is correct and prints each room")]
struct Args {
    /// Engine configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base seed of the run
    #[arg(long)]
    seed: Option<u64>,

    /// Stage whose arrival ends the run
    #[arg(long)]
    stages: Option<u32>,

    /// Probability that a room after the tutorial is anomalous
    #[arg(long)]
    anomaly_chance: Option<f64>,

    /// Pin every anomalous room to the catalog entry at this index
    #[arg(long)]
    test_anomaly: Option<usize>,

    /// Pin the hard tier instead of the easy tier
    #[arg(long)]
    test_hard: bool,

    /// Behaviour once a tier runs out of anomalies
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            stages: self.stages,
            anomaly_chance: self.anomaly_chance,
            test_anomaly: self.test_anomaly,
            test_hard: self.test_hard,
            policy: self.policy,
        }
    }
}

/// Entry point for the Lucid command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = config::load(args.config.as_deref())?;
    let config = config::apply(config, args.overrides())?;

    let bootstrap = Bootstrap;
    let (mut generator, mut progression) = bootstrap
        .start(&config)
        .context("invalid progression settings")?;

    if matches!(args.report, ReportFormat::Console) {
        println!("{}", bootstrap.welcome_banner());
    }
    let summary = play(&mut generator, &mut progression, config.seed, |record| {
        if matches!(args.report, ReportFormat::Console) {
            println!("{}", record.line());
        }
    })?;

    match args.report {
        ReportFormat::Console => println!("{}", summary.ending.line()),
        ReportFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("failed to encode run summary")?
        ),
    }
    Ok(())
}

fn play(
    generator: &mut Generator,
    progression: &mut Progression,
    seed: u64,
    mut on_room: impl FnMut(&StageRecord),
) -> Result<RunSummary> {
    let mut rooms = Vec::new();
    let mut events = Vec::new();

    loop {
        let request = progression.next_request();
        events.clear();
        let code = match generator.generate_room(request.have_anomaly, request.stage, &mut events) {
            Ok(code) => code,
            Err(GenerationError::CatalogExhausted { tier, len }) => {
                info!("stopping run at stage {}", request.stage);
                return Ok(RunSummary {
                    seed,
                    rooms,
                    ending: Ending::CatalogExhausted { tier, len },
                });
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to generate room for stage {}", request.stage))
            }
        };

        let verdict = Verdict::expected_for(code);
        let record = StageRecord {
            stage: request.stage,
            requested_anomaly: request.have_anomaly,
            code,
            verdict,
            signals: events.len(),
        };
        on_room(&record);
        rooms.push(record);

        if let Some(ending) = Ending::from_outcome(progression.resolve(verdict, code)) {
            return Ok(RunSummary {
                seed,
                rooms,
                ending,
            });
        }
    }
}
