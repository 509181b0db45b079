use std::path::Path;
use std::sync::Arc;

use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::extract::{
    extract_dates, extract_education, extract_email, extract_experience, extract_name,
    extract_organizations, extract_phone, extract_skills, SkillMatcher,
};
use crate::ingest::{normalize, CompositeLoader, Section, SectionSegmenter, TextLoader};
use crate::nlp::{shared, Analysis, EntityRecognizer};
use crate::record::ParsedResume;

/// Runs loading, segmentation and every field extractor over one document.
pub struct ResumeParser {
    loader: CompositeLoader,
    segmenter: SectionSegmenter,
    skills: SkillMatcher,
    recognizer: Arc<dyn EntityRecognizer>,
    config: ParserConfig,
}

impl ResumeParser {
    /// Parser backed by the process-wide recognizer.
    pub fn new(config: &ParserConfig) -> Self {
        Self::with_recognizer(config, shared::init(&config.nlp))
    }

    pub fn with_recognizer(config: &ParserConfig, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            loader: CompositeLoader::default(),
            segmenter: SectionSegmenter::default(),
            skills: SkillMatcher::new(&config.extra_skills),
            recognizer,
            config: config.clone(),
        }
    }

    pub fn recognizer(&self) -> &dyn EntityRecognizer {
        self.recognizer.as_ref()
    }

    /// Normalized text of the document at `path`.
    pub fn load(&self, path: &Path) -> Result<String> {
        let raw = self
            .loader
            .load_file(path)
            .map_err(|e| Error::load(path, e))?;
        Ok(normalize(&raw))
    }

    pub fn parse(&self, path: &Path) -> Result<ParsedResume> {
        let text = self.load(path)?;
        let record = self.parse_normalized(path.to_string_lossy().into_owned(), &text);
        tracing::info!(
            path = %path.display(),
            name = record.name.as_deref().unwrap_or("-"),
            skills = record.skills.len(),
            "parsed resume"
        );
        Ok(record)
    }

    /// Parse text that did not come from a file, such as stdin.
    pub fn parse_text(&self, source_path: impl Into<String>, raw_text: &str) -> ParsedResume {
        self.parse_normalized(source_path, &normalize(raw_text))
    }

    fn parse_normalized(&self, source_path: impl Into<String>, text: &str) -> ParsedResume {
        let sections = self.segmenter.split(text);
        let analysis = self.recognizer.analyze(text);
        tracing::debug!(
            chars = text.chars().count(),
            sections = sections.len(),
            entities = analysis.entities.len(),
            "analyzed document"
        );

        let mut record = ParsedResume::new(source_path);
        record.name = extract_name(
            text,
            self.recognizer.as_ref(),
            self.config.name_window_chars,
        );
        record.email = extract_email(text);
        record.phone = extract_phone(text);
        record.skills = extract_skills(&sections, text, &self.skills);
        record.education = extract_education(&sections);
        record.experience = extract_experience(&sections, &analysis);
        record.organizations = extract_organizations(&analysis);
        record.dates_mentioned = extract_dates(&analysis);
        record.raw_text_snippet = text.chars().take(self.config.snippet_chars).collect();
        record
    }

    /// Parse every path in order. A document that fails to load is recorded in
    /// [`BatchParseResult::failed`] and the batch moves on.
    pub fn parse_batch<P: AsRef<Path>>(&self, paths: &[P]) -> BatchParseResult {
        let mut result = BatchParseResult::new();

        for path in paths {
            let path = path.as_ref();
            match self.parse(path) {
                Ok(record) => result.add_success(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to parse resume");
                    result.add_failure(path.to_string_lossy().into_owned(), e);
                }
            }
        }

        result
    }

    pub fn sections(&self, path: &Path) -> Result<Vec<Section>> {
        Ok(self.segmenter.split(&self.load(path)?))
    }

    pub fn analyze(&self, path: &Path) -> Result<Analysis> {
        Ok(self.recognizer.analyze(&self.load(path)?))
    }
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

#[derive(Debug, Default)]
pub struct BatchParseResult {
    pub successful: Vec<ParsedResume>,
    pub failed: Vec<(String, Error)>,
}

impl BatchParseResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn add_success(&mut self, record: ParsedResume) {
        self.successful.push(record);
    }

    fn add_failure(&mut self, path: String, error: Error) {
        self.failed.push((path, error));
    }

    pub fn success_count(&self) -> usize {
        self.successful.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
