use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::sections_matching;
use crate::ingest::Section;
use crate::nlp::{Analysis, EntityLabel};
use crate::record::ExperienceEntry;

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|",
        r"Jul(?:y)?|Aug(?:ust)?|Sep(?:tember)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?|",
        r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4})\b",
    ))
    .expect("valid date regex")
});

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid blank line regex"));

const EXPERIENCE_HEADINGS: &[&str] = &["experience", "professional", "work"];

/// Entries from experience sections. When those yield nothing, every sentence
/// of `analysis` that mentions an organization becomes an entry instead.
pub fn extract_experience(sections: &[Section], analysis: &Analysis) -> Vec<ExperienceEntry> {
    let entries: Vec<ExperienceEntry> = sections_matching(sections, EXPERIENCE_HEADINGS)
        .flat_map(|section| split_entries(&section.content))
        .map(|chunk| ExperienceEntry {
            text: chunk.to_string(),
            dates: DATE
                .find_iter(chunk)
                .map(|m| m.as_str().to_string())
                .collect(),
        })
        .collect();

    if entries.is_empty() {
        from_entities(analysis)
    } else {
        entries
    }
}

fn split_entries(content: &str) -> Vec<&str> {
    let blocks: Vec<&str> = BLANK_LINES.split(content).collect();
    let chunks = if blocks.len() == 1 {
        content.lines().collect()
    } else {
        blocks
    };
    chunks
        .into_iter()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

fn from_entities(analysis: &Analysis) -> Vec<ExperienceEntry> {
    analysis
        .sentences
        .iter()
        .enumerate()
        .filter(|(index, _)| {
            analysis
                .entities_in_sentence(*index)
                .any(|e| e.label == EntityLabel::Organization)
        })
        .map(|(index, sentence)| ExperienceEntry {
            text: sentence.text.trim().to_string(),
            dates: analysis
                .entities_in_sentence(index)
                .filter(|e| matches!(e.label, EntityLabel::Date | EntityLabel::Time))
                .map(|e| e.text.clone())
                .collect::<BTreeSet<_>>(),
        })
        .collect()
}
