//! Matchlog - Entry Point
//!
//! Reads a server log file, runs it through the match pipeline and writes
//! the resulting statistics as JSON.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use matchlog::core::error::Result;
use matchlog::{Game, ParserConfig};

/// Parse a game-server log into per-match statistics
#[derive(Parser, Debug)]
#[command(name = "matchlog")]
#[command(about = "Convert a server log into per-match player, team, class and round statistics")]
struct Args {
    /// Log file to parse
    log: PathBuf,

    /// Parser configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Write output here instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("matchlog=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            ParserConfig::load(path)?
        }
        None => ParserConfig::default(),
    };

    let bytes = std::fs::read(&args.log)?;
    let content = String::from_utf8_lossy(&bytes);

    let mut game = Game::with_config(config);
    for line in content.lines() {
        game.process_line(line);
    }
    game.finish();

    let stats = game.line_stats();
    tracing::info!(
        "Parsed {}: {} lines, {} events",
        args.log.display(),
        stats.lines,
        stats.dispatched
    );

    let report = game.report();
    tracing::info!("{}", report.summary());

    let json = if args.pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
