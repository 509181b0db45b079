use super::tokenize::{split_sentences, tokenize};
use super::{Analysis, Capability, EntityRecognizer};

/// Recognizer used when entity recognition is disabled or unavailable.
/// Tokens and sentences are still produced; no entities ever are.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankRecognizer;

impl BlankRecognizer {
    pub const fn new() -> Self {
        Self
    }
}

impl EntityRecognizer for BlankRecognizer {
    fn capability(&self) -> Capability {
        Capability::TokenizeOnly
    }

    fn analyze(&self, text: &str) -> Analysis {
        Analysis {
            tokens: tokenize(text),
            sentences: split_sentences(text),
            entities: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_has_no_entities() {
        let analysis = BlankRecognizer::new().analyze("Jane Doe\nAcme Corp, 2019.");

        assert!(analysis.entities.is_empty());
        assert_eq!(analysis.sentences.len(), 2);
        assert!(!analysis.tokens.is_empty());
        assert_eq!(BlankRecognizer.capability(), Capability::TokenizeOnly);
    }
}
