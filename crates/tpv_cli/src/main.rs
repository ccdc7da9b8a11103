//! Transfer portal valuation CLI
//!
//! Evaluate one player, backtest a historical transfer ledger, or run
//! temporal cross-validation. All output is JSON on stdout.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use tpv_core::calibration::{accuracy_metrics, identify_biases, Backtester, ConfigProposal, TestPeriod};
use tpv_core::engine::ValuationEngine;
use tpv_core::scoring::TeamContext;

mod input;

#[derive(Parser)]
#[command(name = "tpv")]
#[command(about = "Transfer portal valuation and backtesting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value one player at their current program and candidate destinations
    Evaluate {
        /// Player profile JSON
        #[arg(long)]
        profile: PathBuf,

        /// Scheme catalog JSON (array of scheme requirements)
        #[arg(long)]
        schemes: PathBuf,

        /// Program id of the player's current scheme
        #[arg(long)]
        current: String,

        /// Candidate program ids (repeatable)
        #[arg(long = "candidate")]
        candidates: Vec<String>,

        /// Destination depth-chart quality in [0, 1]
        #[arg(long, default_value_t = 0.5)]
        depth_quality: f64,

        /// Destination scheme dependency in [0, 1]
        #[arg(long, default_value_t = 0.5)]
        scheme_dependency: f64,

        /// Config JSON (defaults built in)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Replay historical transfers and report accuracy, biases, and proposals
    Backtest {
        /// Transfer ledger CSV
        #[arg(long)]
        transfers: PathBuf,

        /// Player snapshot history JSON
        #[arg(long)]
        history: PathBuf,

        /// Scheme catalog JSON
        #[arg(long)]
        schemes: PathBuf,

        /// Inclusive period start (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Inclusive period end (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        /// Config JSON (defaults built in)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Temporal k-fold cross-validation over the transfer ledger
    CrossValidate {
        /// Transfer ledger CSV
        #[arg(long)]
        transfers: PathBuf,

        /// Player snapshot history JSON
        #[arg(long)]
        history: PathBuf,

        /// Scheme catalog JSON
        #[arg(long)]
        schemes: PathBuf,

        /// Number of folds
        #[arg(long, default_value_t = 5)]
        folds: usize,

        /// Config JSON (defaults built in)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Evaluate {
            profile,
            schemes,
            current,
            candidates,
            depth_quality,
            scheme_dependency,
            config,
        } => {
            let config = input::load_config(config.as_deref())?;
            let profile = input::load_profile(&profile)?;
            let catalog = input::load_schemes(&schemes)?;
            let current_scheme = catalog
                .get(&current)
                .with_context(|| format!("program {} missing from scheme catalog", current))?;
            let candidate_schemes = candidates
                .iter()
                .map(|id| {
                    catalog
                        .get(id)
                        .cloned()
                        .with_context(|| format!("program {} missing from scheme catalog", id))
                })
                .collect::<Result<Vec<_>>>()?;
            if !(0.0..=1.0).contains(&depth_quality) || !(0.0..=1.0).contains(&scheme_dependency)
            {
                bail!("depth-quality and scheme-dependency must be in [0, 1]");
            }
            let context = TeamContext { depth_quality, scheme_dependency };

            let engine = ValuationEngine::new(config)?;
            let result =
                engine.evaluate(&profile, current_scheme, &candidate_schemes, &context)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Backtest { transfers, history, schemes, start, end, config } => {
            if end < start {
                bail!("period end {} precedes start {}", end, start);
            }
            let config = input::load_config(config.as_deref())?;
            let catalog = input::load_schemes(&schemes)?;
            let transfers = input::load_transfers(&transfers, &catalog)?;
            let history = input::load_history(&history)?;

            let backtester = Backtester::new(config.clone())?;
            let result =
                backtester.backtest_transfers(&transfers, &history, TestPeriod { start, end });
            let metrics = accuracy_metrics(&result);
            let biases = identify_biases(&result);
            let proposal = ConfigProposal::from_bias_report(&biases, &config);

            let report = json!({
                "result": result,
                "metrics": metrics,
                "biases": biases,
                "proposal": proposal,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::CrossValidate { transfers, history, schemes, folds, config } => {
            let config = input::load_config(config.as_deref())?;
            let catalog = input::load_schemes(&schemes)?;
            let transfers = input::load_transfers(&transfers, &catalog)?;
            let history = input::load_history(&history)?;

            let backtester = Backtester::new(config)?;
            let fold_metrics = backtester.cross_validate(&transfers, &history, folds)?;
            println!("{}", serde_json::to_string_pretty(&fold_metrics)?);
        }
    }
    Ok(())
}
