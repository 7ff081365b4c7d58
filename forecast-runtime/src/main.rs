//! Command line front end for the forecaster.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use forecast_runtime::{cli, DEFAULT_MODEL_PATH};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "forecast")]
#[command(about = "Run predictions from a trained model artifact", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict one row per input sample
    Predict {
        /// Model artifact to load
        #[arg(long, default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,
        /// Sample file, one row per line (stdin if omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Write a randomly initialised linear model artifact
    Demo {
        /// Output file for the artifact
        #[arg(long, default_value = DEFAULT_MODEL_PATH)]
        out: PathBuf,
        /// Number of input features
        #[arg(long)]
        features: usize,
        /// Number of predicted values per sample
        #[arg(long, default_value_t = 1)]
        targets: usize,
    },
    /// Show the dimensions of a model artifact
    Info {
        #[arg(long, default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match args.command {
        Commands::Predict { model, input } => {
            let stdout = io::stdout().lock();
            match input {
                Some(path) => cli::predict(
                    &model,
                    || {
                        let file = File::open(&path)
                            .with_context(|| format!("failed to open {}", path.display()))?;
                        Ok(BufReader::new(file))
                    },
                    stdout,
                )?,
                None => cli::predict(&model, || Ok(io::stdin().lock()), stdout)?,
            };
        }
        Commands::Demo { out, features, targets } => {
            cli::demo(&out, features, targets)?;
            println!("Saved demo model to {:?}", out);
        }
        Commands::Info { model } => cli::info(&model, io::stdout().lock())?,
    }
    Ok(())
}
