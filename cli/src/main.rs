
mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{export, stats, story};
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise `-v` raises the level from warn.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match &cli.command {
        Commands::Stats(args) => stats::run(&cli, args),
        Commands::Export(args) => export::run(&cli, args),
        Commands::Story(args) => story::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
