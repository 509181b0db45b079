use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_LEXICON: &str = include_str!("../../assets/lexicon.json");

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Failed to read lexicon {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid lexicon: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Lexicon produced an invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Word lists that drive [`super::RuleRecognizer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// First names; a capitalized pair starting with one of these is a person
    pub given_names: Vec<String>,
    /// Trailing words that turn a capitalized run into an organization
    pub organization_suffixes: Vec<String>,
    /// Words that open "Head of Something" organization names
    pub organization_heads: Vec<String>,
    /// Organization names recognized verbatim
    pub organizations: Vec<String>,
}

impl Lexicon {
    pub fn builtin() -> Result<Self, LexiconError> {
        Self::from_json(BUILTIN_LEXICON)
    }

    pub fn from_json(source: &str) -> Result<Self, LexiconError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, LexiconError> {
        let source = std::fs::read_to_string(path).map_err(|source| LexiconError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    pub fn is_empty(&self) -> bool {
        self.given_names.is_empty()
            && self.organization_suffixes.is_empty()
            && self.organization_heads.is_empty()
            && self.organizations.is_empty()
    }
}
