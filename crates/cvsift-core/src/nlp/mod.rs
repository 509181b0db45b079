//! Named-entity recognition used as a fallback signal by the field extractors.
//!
//! Two recognizers implement [`EntityRecognizer`]: [`RuleRecognizer`] labels
//! persons, organizations, dates and times from a [`Lexicon`], while
//! [`BlankRecognizer`] only tokenizes and splits sentences. Extractors treat an
//! empty entity list as a normal outcome, so swapping one for the other only
//! changes which fallback paths fire.

mod blank;
mod lexicon;
mod rules;
pub mod shared;
mod tokenize;

use serde::{Deserialize, Serialize};

pub use blank::BlankRecognizer;
pub use lexicon::{Lexicon, LexiconError};
pub use rules::RuleRecognizer;
pub use tokenize::{split_sentences, tokenize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    Person,
    Organization,
    Date,
    Time,
}

impl EntityLabel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Organization => "organization",
            Self::Date => "date",
            Self::Time => "time",
        }
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a recognizer can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Tokens, sentences and labelled entities
    Full,
    /// Tokens and sentences only; entity lists are always empty
    TokenizeOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedEntity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
    /// Index into [`Analysis::sentences`]
    pub sentence: usize,
}

/// Output of one recognizer pass. Offsets are byte offsets into the analyzed
/// text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub sentences: Vec<Sentence>,
    pub entities: Vec<RecognizedEntity>,
}

impl Analysis {
    pub fn entities_labeled(&self, label: EntityLabel) -> impl Iterator<Item = &RecognizedEntity> {
        self.entities.iter().filter(move |e| e.label == label)
    }

    pub fn entities_in_sentence(&self, index: usize) -> impl Iterator<Item = &RecognizedEntity> {
        self.entities.iter().filter(move |e| e.sentence == index)
    }

    pub fn first_labeled(&self, label: EntityLabel) -> Option<&RecognizedEntity> {
        self.entities_labeled(label).next()
    }
}

pub trait EntityRecognizer: Send + Sync {
    fn capability(&self) -> Capability;

    fn analyze(&self, text: &str) -> Analysis;
}
