use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use swimbench::application::batch::BatchRunner;
use swimbench::application::engine::BenchmarkEngine;
use swimbench::application::service::BenchmarkService;
use swimbench::config::Config;
use swimbench::domain::benchmark::BenchmarkResult;
use swimbench::domain::swim::{Gender, SwimTime, SwimmerQuery};
use swimbench::infrastructure::providers::{CsvProvider, csv_store};
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Benchmark youth swim times against peers and motivational standards", long_about = None)]
struct Cli {
    /// Standards CSV (event,age,gender,tier,threshold)
    #[arg(long, default_value = "fixtures/standards.csv")]
    standards: PathBuf,

    /// Peer results CSV (event,age,gender,time,date)
    #[arg(long, default_value = "fixtures/results.csv")]
    results: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Benchmark a single swim
    Evaluate {
        /// Event name, e.g. "100 Free SCY"
        #[arg(short, long)]
        event: String,

        /// Swimmer age in years
        #[arg(short, long)]
        age: u8,

        /// M or F; omit if not recorded
        #[arg(short, long)]
        gender: Option<String>,

        /// Time in meet format ("1:03.45") or raw seconds ("63.45")
        #[arg(short, long)]
        time: String,
    },
    /// Benchmark a whole roster CSV in parallel
    Roster {
        /// Roster CSV (event,age,gender,time)
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let provider = Arc::new(CsvProvider::from_paths(&cli.standards, &cli.results)?);
    let service = BenchmarkService::new(provider, BenchmarkEngine::new(config.policy));

    match cli.command {
        Commands::Evaluate {
            event,
            age,
            gender,
            time,
        } => {
            let gender = gender.as_deref().map(str::parse::<Gender>).transpose()?;
            let time = SwimTime::parse(&time)?;
            let query = SwimmerQuery::new(&event, age, gender, time);
            info!(cohort = %query.cohort_label(), time = %query.time, "evaluating swim");

            let result = service.evaluate(&query).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Roster { file } => {
            let roster = csv_store::load_roster(&file)?;
            info!(entries = roster.len(), "evaluating roster");

            let runner = BatchRunner::new(Arc::new(service));
            let outcomes = runner.evaluate_all(roster).await;

            for outcome in &outcomes {
                match &outcome.result {
                    Ok(result) => println!(
                        "{:<32} {:>8}  {}",
                        outcome.query.cohort_label(),
                        outcome.query.time.to_string(),
                        describe(result)
                    ),
                    Err(e) => println!(
                        "{:<32} {:>8}  error: {}",
                        outcome.query.cohort_label(),
                        outcome.query.time.to_string(),
                        e
                    ),
                }
            }

            let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
            if failed > 0 {
                warn!(failed, total = outcomes.len(), "roster finished with failures");
            }
        }
    }

    Ok(())
}

fn describe(result: &BenchmarkResult) -> String {
    let mut parts = vec![result.classification.to_string()];
    if let Some(rank) = &result.percentile {
        parts.push(format!("percentile {:.1} of {}", rank.value, rank.population));
    }
    if let Some(goal) = &result.nearest_tier {
        parts.push(format!("{}s to {}", goal.delta_seconds, goal.tier));
    }
    if let Some(adjustment) = &result.adjustment {
        parts.push(format!("widened to {}", adjustment));
    }
    parts.join(", ")
}
