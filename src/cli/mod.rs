pub mod inspect;
pub mod parse;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cvsift_core::ParserConfig;

#[derive(Parser)]
#[command(
    name = "cvsift",
    about = "Extract structured candidate data from PDF, DOCX and text resumes",
    version
)]
pub struct Cli {
    /// Configuration file (defaults to $CONFIG_DIR/cvsift/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Disable entity recognition; name, organization and date fields use fallbacks
    #[arg(long = "no-nlp", global = true)]
    pub no_nlp: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse resumes into JSON records (use - to read one from stdin)
    Parse {
        /// Resume file path(s)
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Write JSON, CSV and a manifest into this directory instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the normalized text of a document
    Text {
        /// Resume file path
        path: PathBuf,
    },
    /// Print the sections a document splits into
    Sections {
        /// Resume file path
        path: PathBuf,
    },
    /// Print recognized entities
    Entities {
        /// Resume file path
        path: PathBuf,
    },
}

pub fn load_config(path: Option<&Path>, no_nlp: bool) -> Result<ParserConfig> {
    let mut config = ParserConfig::load(path).context("failed to load configuration")?;
    if no_nlp {
        config.nlp.enabled = false;
    }
    Ok(config)
}
