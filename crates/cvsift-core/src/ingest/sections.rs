use serde::{Deserialize, Serialize};

/// Heading given to text that precedes the first recognized section heading.
pub const HEADER: &str = "header";

/// Known resume headings in match order: the first phrase that matches at the
/// start of a line wins. Each phrase maps to the canonical heading name.
const DEFAULT_HEADINGS: &[(&str, &str)] = &[
    ("summary", "summary"),
    ("objective", "objective"),
    ("skills", "skills"),
    ("technical skills", "technical skills"),
    ("education", "education"),
    ("experience", "experience"),
    ("work experience", "work experience"),
    ("professional experience", "professional experience"),
    ("projects", "projects"),
    ("certifications", "certifications"),
    ("awards", "awards"),
    ("publications", "publications"),
    ("languages", "languages"),
    ("interests", "interests"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub content: String,
}

impl Section {
    #[must_use]
    pub fn new(heading: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            content: content.into(),
        }
    }

    pub fn heading_contains(&self, needle: &str) -> bool {
        self.heading.contains(needle)
    }
}

#[derive(Debug, Clone)]
struct HeadingRule {
    phrase: String,
    canonical: String,
}

/// Splits normalized resume text into `(heading, content)` blocks using a
/// table of heading phrases.
#[derive(Debug, Clone)]
pub struct SectionSegmenter {
    rules: Vec<HeadingRule>,
}

impl SectionSegmenter {
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a heading phrase. Phrases are matched case-insensitively and are
    /// tried in the order they were added.
    #[must_use]
    pub fn with_heading(mut self, phrase: &str, canonical: &str) -> Self {
        self.rules.push(HeadingRule {
            phrase: phrase.to_lowercase(),
            canonical: canonical.to_lowercase(),
        });
        self
    }

    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.canonical.as_str())
    }

    /// Match a line against the heading table, returning the canonical heading
    /// and any inline content that follows it on the same line.
    pub fn match_heading<'a>(&self, line: &'a str) -> Option<(&str, &'a str)> {
        let trimmed = line.trim_start();

        self.rules.iter().find_map(|rule| {
            let prefix = trimmed.get(..rule.phrase.len())?;
            if !prefix.eq_ignore_ascii_case(&rule.phrase) {
                return None;
            }

            let rest = &trimmed[rule.phrase.len()..];
            if rest.chars().next().is_some_and(char::is_alphanumeric) {
                return None;
            }

            let rest = rest.trim_start();
            let rest = rest
                .strip_prefix(':')
                .or_else(|| rest.strip_prefix('-'))
                .unwrap_or(rest);

            Some((rule.canonical.as_str(), rest.trim()))
        })
    }

    pub fn split(&self, text: &str) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut current_heading = HEADER.to_string();
        let mut buffer: Vec<&str> = Vec::new();

        for line in text.lines() {
            if let Some((heading, inline)) = self.match_heading(line) {
                flush(&mut sections, &current_heading, &mut buffer);
                current_heading = heading.to_string();
                if !inline.is_empty() {
                    buffer.push(inline);
                }
            } else {
                buffer.push(line);
            }
        }
        flush(&mut sections, &current_heading, &mut buffer);

        tracing::debug!(count = sections.len(), "segmented sections");
        sections
    }
}

fn flush(sections: &mut Vec<Section>, heading: &str, buffer: &mut Vec<&str>) {
    if buffer.is_empty() {
        return;
    }
    let content = buffer.join("\n").trim().to_string();
    sections.push(Section::new(heading, content));
    buffer.clear();
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        DEFAULT_HEADINGS
            .iter()
            .fold(Self::new(), |seg, (phrase, canonical)| {
                seg.with_heading(phrase, canonical)
            })
    }
}
