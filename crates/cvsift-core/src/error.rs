use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::ingest::LoadError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unreadable document {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn load(path: impl Into<PathBuf>, source: LoadError) -> Self {
        Self::Load {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
