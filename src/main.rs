use anyhow::Result;
use clap::Parser;

use cvsift::cli::{self, Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let config = cli::load_config(args.config.as_deref(), args.no_nlp)?;

    match args.command {
        Commands::Parse {
            paths,
            out,
            compact,
        } => cli::parse::run(&config, &paths, out.as_deref(), compact),
        Commands::Text { path } => cli::inspect::run_text(&config, &path),
        Commands::Sections { path } => cli::inspect::run_sections(&config, &path),
        Commands::Entities { path } => cli::inspect::run_entities(&config, &path),
    }
}
