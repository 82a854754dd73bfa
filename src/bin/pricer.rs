//! CLI entry point: price a target size over a market-data event stream.
//!
//! Usage:
//!   pricer 200 < book.log
//!   pricer --config pricer.toml --input book.log

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use book_pricer::{Config, Quantity, RunStats, Session};

#[derive(Parser)]
#[command(name = "pricer")]
#[command(about = "Price a target size against an incremental order book")]
#[command(version)]
struct Cli {
    /// Shares to value on each side (overrides the config file)
    target: Option<Quantity>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read events from this file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let Some(path) = &cli.config else {
        let target = cli
            .target
            .context("a target size or --config must be given")?;
        return Ok(Config::with_target(target)?);
    };

    let mut config = Config::load(path)?;
    if let Some(target) = cli.target {
        config.pricer.target = target;
        config.validate()?;
    }
    Ok(config)
}

fn run(cli: &Cli, config: &Config) -> Result<RunStats> {
    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open input {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };
    let output = BufWriter::new(io::stdout().lock());

    let mut session = Session::new(config);
    let stats = session.run(input, output).context("event stream failed")?;
    Ok(stats)
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e:#}");
            process::exit(2);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .format_timestamp_secs()
    .init();

    if let Err(e) = run(&cli, &config) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
