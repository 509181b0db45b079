#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod nlp;
pub mod pipeline;
pub mod record;

pub use config::{ConfigError, NlpConfig, ParserConfig};
pub use error::{Error, Result};
pub use ingest::{
    load_text, normalize, CompositeLoader, DocumentFormat, DocxLoader, LoadError, LoadResult,
    PdfLoader, PlainTextLoader, Section, SectionSegmenter, TextLoader, HEADER,
};
pub use nlp::{
    Analysis, BlankRecognizer, Capability, EntityLabel, EntityRecognizer, Lexicon, LexiconError,
    RecognizedEntity, RuleRecognizer, Sentence, Token,
};
pub use pipeline::{BatchParseResult, ResumeParser};
pub use record::{EducationEntry, ExperienceEntry, ParsedResume, TabularRow};
