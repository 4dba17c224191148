mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{dedup, query};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Dedup(args) => dedup::run(&cli, args),
        Commands::Query(args) => query::run(&cli, args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();
}

fn main() -> anyhow::Result<()> { run() }
