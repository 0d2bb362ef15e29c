use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

use meridian_instruments::{instruments_with_gates, select_instruments};
use meridian_report::Orchestrator;
use meridian_validity::ValidityCalculator;

mod config;

#[derive(Parser)]
#[command(name = "meridian", version, about = "Score questionnaire response sets")]
struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a response set and print the assembled report.
    Score {
        /// Response set JSON file, or "-" for stdin.
        input: PathBuf,
        /// Scoring config file. Defaults to the platform config dir.
        #[arg(long, env = "MERIDIAN_CONFIG")]
        config: Option<PathBuf>,
        /// Only run these instruments (repeatable).
        #[arg(long = "only")]
        only: Vec<String>,
        #[arg(long)]
        pretty: bool,
    },
    /// List the registered instruments.
    Instruments,
    /// Write the default scoring config to the platform config dir.
    InitConfig,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Command::Score {
            input,
            config,
            only,
            pretty,
        } => score(input, config, only, pretty),
        Command::Instruments => {
            for instrument in meridian_instruments::all_instruments() {
                println!("{}\t{}", instrument.id(), instrument.name());
            }
            Ok(())
        }
        Command::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn score(input: PathBuf, config: Option<PathBuf>, only: Vec<String>, pretty: bool) -> Result<()> {
    let config = config::load_config(config.as_deref())?;

    let mut scorers = instruments_with_gates(&config.gates);
    if !only.is_empty() {
        scorers = select_instruments(scorers, &only)?;
    }
    let orchestrator = Orchestrator::new(scorers, ValidityCalculator::new(config.validity));

    let contents = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(&input)
            .map_err(|e| eyre::eyre!("failed to read {}: {e}", input.display()))?
    };
    let value: serde_json::Value = serde_json::from_str(&contents)?;
    let report = orchestrator.assemble_json(value)?;

    let out = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{out}");
    Ok(())
}
