//! Command-line entry point: seed the corpus, reset the database, or run the
//! benchmark suite and render reports.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use mongo_odm_bench::{
    config::Config,
    registry::{OpKind, Strategy},
    report::{charts, tables},
    runner::{run_benchmarks, RunOptions},
    seed,
};

/// MongoDB ODM vs raw driver performance benchmark.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the benchmark database.
    Seed {
        /// Drop existing collections and re-seed from scratch.
        #[arg(long)]
        force: bool,
    },

    /// Drop the benchmark database.
    Reset,

    /// Run benchmarks and print comparison reports.
    Run {
        /// Run only read benchmarks.
        #[arg(long)]
        reads: bool,

        /// Run only write benchmarks.
        #[arg(long)]
        writes: bool,

        /// Run benchmarks for a single strategy (raw, typed, repo, record).
        #[arg(long)]
        library: Option<String>,

        /// Skip chart generation.
        #[arg(long)]
        no_charts: bool,

        /// Directory chart files are written to (overrides ODM_BENCH_OUTPUT).
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Timed iterations per benchmark.
        #[arg(long, default_value_t = 100)]
        iterations: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level: Level = cli.log_level.parse().unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    let mut config = Config::from_env();

    match cli.command {
        Commands::Seed { force } => {
            seed::seed_database(&config, force)?;
        }
        Commands::Reset => {
            seed::reset_database(&config)?;
        }
        Commands::Run {
            reads,
            writes,
            library,
            no_charts,
            output,
            iterations,
        } => {
            if let Some(dir) = output {
                config.output_dir = dir;
            }
            let strategy = library.as_deref().map(str::parse::<Strategy>).transpose()?;
            let kind = match (reads, writes) {
                (true, false) => Some(OpKind::Read),
                (false, true) => Some(OpKind::Write),
                _ => None,
            };

            seed::ensure_seeded(&config)?;

            let results = run_benchmarks(
                &config,
                &RunOptions {
                    strategy,
                    kind,
                    iterations,
                },
            )?;

            tables::print_results(&results);

            if !no_charts && !results.is_empty() {
                charts::render_all(&results, &config.output_dir)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_accepts_output_directory() {
        let cli = Cli::try_parse_from(["mongo-odm-bench", "run", "--output", "charts/latest"])
            .unwrap();
        match cli.command {
            Commands::Run { output, .. } => {
                assert_eq!(output, Some(PathBuf::from("charts/latest")));
            }
            _ => panic!("expected run subcommand"),
        }
    }

    #[test]
    fn output_directory_defaults_to_config() {
        let cli = Cli::try_parse_from(["mongo-odm-bench", "run"]).unwrap();
        match cli.command {
            Commands::Run { output, .. } => assert_eq!(output, None),
            _ => panic!("expected run subcommand"),
        }
    }
}
