//! Process-wide recognizer, built once and shared by every parser.

use std::sync::{Arc, OnceLock};

use super::{BlankRecognizer, EntityRecognizer, Lexicon, LexiconError, RuleRecognizer};
use crate::config::NlpConfig;

static RECOGNIZER: OnceLock<Arc<dyn EntityRecognizer>> = OnceLock::new();

/// Build the shared recognizer from `config` on first call. Later calls return
/// the existing instance regardless of their configuration.
pub fn init(config: &NlpConfig) -> Arc<dyn EntityRecognizer> {
    if let Some(existing) = RECOGNIZER.get() {
        tracing::debug!("entity recognizer already initialized");
        return Arc::clone(existing);
    }
    Arc::clone(RECOGNIZER.get_or_init(|| build(config)))
}

/// The shared recognizer, initialized with default settings if needed.
pub fn get() -> Arc<dyn EntityRecognizer> {
    Arc::clone(RECOGNIZER.get_or_init(|| build(&NlpConfig::default())))
}

/// Build a fresh recognizer. A lexicon that cannot be loaded degrades to
/// [`BlankRecognizer`] with a warning instead of failing.
pub fn build(config: &NlpConfig) -> Arc<dyn EntityRecognizer> {
    if !config.enabled {
        tracing::info!("entity recognition disabled; name, organization and date fields will rely on fallbacks");
        return Arc::new(BlankRecognizer::new());
    }

    match rule_recognizer(config) {
        Ok(recognizer) => {
            tracing::debug!(capability = ?recognizer.capability(), "entity recognizer ready");
            Arc::new(recognizer)
        }
        Err(e) => {
            tracing::warn!(error = %e, "entity recognizer unavailable, continuing without entities");
            Arc::new(BlankRecognizer::new())
        }
    }
}

fn rule_recognizer(config: &NlpConfig) -> Result<RuleRecognizer, LexiconError> {
    let lexicon = match &config.lexicon_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading lexicon");
            Lexicon::from_file(path)?
        }
        None => Lexicon::builtin()?,
    };
    RuleRecognizer::new(lexicon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::Capability;
    use std::path::PathBuf;

    #[test]
    fn test_build_default_is_full() {
        let recognizer = build(&NlpConfig::default());
        assert_eq!(recognizer.capability(), Capability::Full);
    }

    #[test]
    fn test_build_disabled_is_blank() {
        let config = NlpConfig {
            enabled: false,
            lexicon_path: None,
        };
        assert_eq!(build(&config).capability(), Capability::TokenizeOnly);
    }

    #[test]
    fn test_missing_lexicon_degrades() {
        let config = NlpConfig {
            enabled: true,
            lexicon_path: Some(PathBuf::from("/nonexistent/lexicon.json")),
        };
        let recognizer = build(&config);

        assert_eq!(recognizer.capability(), Capability::TokenizeOnly);
        assert!(recognizer.analyze("Jane Doe at Acme Inc").entities.is_empty());
    }

    #[test]
    fn test_custom_lexicon_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("lexicon.json");
        std::fs::write(&path, r#"{"organizations": ["Initech"]}"#).unwrap();

        let recognizer = build(&NlpConfig {
            enabled: true,
            lexicon_path: Some(path),
        });
        let analysis = recognizer.analyze("Worked at Initech in 1999");

        assert_eq!(recognizer.capability(), Capability::Full);
        assert_eq!(analysis.entities.len(), 2);
    }

    #[test]
    fn test_shared_instance_is_reused() {
        let first = get();
        let second = init(&NlpConfig::default());
        assert!(Arc::ptr_eq(&first, &second));
    }
}
