use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const ENV_NLP: &str = "CVSIFT_NLP";
const ENV_LEXICON: &str = "CVSIFT_LEXICON";
const ENV_SNIPPET_CHARS: &str = "CVSIFT_SNIPPET_CHARS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Entity recognition settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NlpConfig {
    /// When false the recognizer only tokenizes and never reports entities
    pub enabled: bool,
    /// JSON lexicon to use instead of the built-in one
    pub lexicon_path: Option<PathBuf>,
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lexicon_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Number of characters of normalized text kept in `raw_text_snippet`
    pub snippet_chars: usize,
    /// Number of leading characters searched for a person name
    pub name_window_chars: usize,
    /// Additional keywords for the whole-document skills scan
    pub extra_skills: Vec<String>,
    pub nlp: NlpConfig,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            snippet_chars: 2000,
            name_window_chars: 1000,
            extra_skills: Vec::new(),
            nlp: NlpConfig::default(),
        }
    }
}

impl ParserConfig {
    /// `$CONFIG_DIR/cvsift/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cvsift").join("config.toml"))
    }

    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&source)
    }

    /// Resolve configuration from defaults, then a TOML file, then the
    /// environment. An explicit path must exist; the default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "loading default config");
                    Self::from_file(&path)?
                }
                None => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides using `lookup` to read variables, so tests can supply
    /// their own environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_NLP) {
            self.nlp.enabled = !matches!(
                value.to_ascii_lowercase().as_str(),
                "0" | "false" | "off" | "no"
            );
        }
        if let Some(value) = lookup(ENV_LEXICON).filter(|v| !v.is_empty()) {
            self.nlp.lexicon_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup(ENV_SNIPPET_CHARS) {
            self.snippet_chars = value.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{ENV_SNIPPET_CHARS} must be an integer, got '{value}'"))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.snippet_chars == 0 {
            return Err(ConfigError::Invalid("snippet_chars must be positive".into()));
        }
        if self.name_window_chars == 0 {
            return Err(ConfigError::Invalid(
                "name_window_chars must be positive".into(),
            ));
        }
        Ok(())
    }
}
