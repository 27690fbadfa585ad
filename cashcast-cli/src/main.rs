use anyhow::{bail, Context, Result};
use cashcast_core::{categorize, TxnKind};
use cashcast_finance::CashFlowEngine;
use cashcast_ingest::load_messages;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;

mod config;
mod report;
mod state;

use config::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "cashcast",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CASHCAST_BUILD_SHA"), ")"),
    about = "Cash-flow outlook from bank SMS extractions"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the cash-flow pipeline over a message dump (.json or .csv)
    Predict {
        /// Path to the dump
        #[arg(long)]
        input: PathBuf,

        /// Output format (default: from config, else text)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Risky days listed in text output
        #[arg(long)]
        risky_limit: Option<usize>,

        /// IANA time zone for timestamp-derived dates
        #[arg(long)]
        timezone: Option<String>,

        /// Suppress progress lines on stderr
        #[arg(long)]
        quiet: bool,
    },

    /// Show which category a merchant falls into
    Categorize {
        #[arg(long)]
        merchant: Option<String>,

        /// debit, credit or info
        #[arg(long, default_value = "debit")]
        kind: String,
    },

    /// Manage ~/.cashcast/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

/// Progress notifications forwarded from the blocking worker
#[derive(Debug, Clone)]
struct ProgressEvent {
    status: String,
    progress: f32,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Predict {
            input,
            format,
            risky_limit,
            timezone,
            quiet,
        } => {
            predict(input, format, risky_limit, timezone, quiet).await?;
        }

        Command::Categorize { merchant, kind } => {
            let kind = TxnKind::parse(Some(kind.as_str()));
            let category = categorize(merchant.as_deref(), &kind);
            println!("{category}");
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

async fn predict(
    input: PathBuf,
    format: Option<OutputFormat>,
    risky_limit: Option<usize>,
    timezone: Option<String>,
    quiet: bool,
) -> Result<()> {
    if !input.exists() {
        bail!("message dump not found: {} (pass --input <path>)", input.display());
    }

    let mut cfg = config::load_config()?;
    if let Some(tz) = timezone {
        cfg.engine.timezone = tz;
    }
    let format = format.unwrap_or(cfg.output.format);
    let risky_limit = risky_limit.unwrap_or(cfg.output.risky_days_shown);

    let messages = load_messages(&input)?;
    log::info!("loaded {} messages from {}", messages.len(), input.display());

    let engine = CashFlowEngine::new(cfg.engine).context("building engine")?;

    // The pipeline is synchronous; run it off the async runtime and stream
    // progress back over a channel.
    let (tx, mut rx) = mpsc::unbounded_channel::<ProgressEvent>();
    let worker = tokio::task::spawn_blocking(move || {
        let mut sink = |status: &str, progress: f32| {
            let _ = tx.send(ProgressEvent {
                status: status.to_string(),
                progress,
            });
        };
        engine.run_messages(&messages, &mut sink)
    });

    while let Some(ev) = rx.recv().await {
        if !quiet {
            eprint!("\r[{:>3.0}%] {:<28}", ev.progress * 100.0, ev.status);
            let _ = std::io::stderr().flush();
        }
    }
    if !quiet {
        eprintln!();
    }

    let prediction = worker.await.context("prediction worker failed")?;
    println!("{}", report::render(&prediction, format, risky_limit)?);

    Ok(())
}
