use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::lexicon::{Lexicon, LexiconError};
use super::tokenize::{split_sentences, tokenize};
use super::{Analysis, Capability, EntityLabel, EntityRecognizer, RecognizedEntity, Sentence};

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    let single = format!(
        r"(?:{MONTH}(?:[ \t]+\d{{1,2}},?)?[ \t]+(?:19|20)\d{{2}}|\d{{1,2}}[/.-]\d{{1,2}}[/.-]\d{{2,4}}|\d{{1,2}}/(?:19|20)\d{{2}}|(?:19|20)\d{{2}})"
    );
    let separator = r"(?:[ \t]*[-–—][ \t]*|[ \t]+to[ \t]+)";
    let open_end = r"(?:present|current|now|today)";
    Regex::new(&format!(
        r"(?i)\b{single}{separator}(?:{single}|{open_end})\b|\b{single}\b"
    ))
    .expect("valid date regex")
});

static TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d{1,2}:\d{2}(?:[ \t]?[ap]\.?m\b\.?)?").expect("valid time regex")
});

static PERSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b([A-Z][a-z]+)(?:[ \t]+[A-Z]\.)?[ \t]+[A-Z][a-z]*(?:['-]?[A-Z][a-z]+)*\b",
    )
    .expect("valid person regex")
});

static PERSON_UPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z]{2,})(?:[ \t]+[A-Z]\.)?[ \t]+[A-Z]{2,}(?:['-][A-Z]+)?\b")
        .expect("valid upper-case person regex")
});

/// Capitalized word inside an organization name.
const CAP_WORD: &str = r"[A-Z][\w&'-]*";

/// Leading words swallowed by a capitalized run that are not part of the
/// name, including capitalized sentence openers.
const ORG_LEADING_NOISE: &[&str] = &[
    "at", "in", "for", "with", "from", "joined", "worked", "by", "and", "to", "of", "a", "an",
    "as", "on", "via", "later", "then", "also", "previously", "currently", "formerly", "since",
    "after", "before", "during", "while", "when", "now", "rejoined", "founded", "left",
];

#[derive(Debug, Clone, Copy)]
struct Candidate {
    start: usize,
    end: usize,
    label: EntityLabel,
}

impl Candidate {
    const fn len(&self) -> usize {
        self.end - self.start
    }

    const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    const fn priority(&self) -> u8 {
        match self.label {
            EntityLabel::Date => 0,
            EntityLabel::Time => 1,
            EntityLabel::Organization => 2,
            EntityLabel::Person => 3,
        }
    }
}

/// Pattern and word-list driven recognizer.
pub struct RuleRecognizer {
    given_names: HashSet<String>,
    known_orgs: Option<Regex>,
    headed_orgs: Option<Regex>,
    suffixed_orgs: Option<Regex>,
}

impl RuleRecognizer {
    pub fn new(lexicon: Lexicon) -> Result<Self, LexiconError> {
        let given_names = lexicon
            .given_names
            .iter()
            .map(|n| n.to_lowercase())
            .collect();

        let mut known: Vec<&str> = lexicon
            .organizations
            .iter()
            .map(String::as_str)
            .filter(|o| !o.trim().is_empty())
            .collect();
        // Longest names first so "Amazon Web Services" wins over "Amazon".
        known.sort_by_key(|o| std::cmp::Reverse(o.len()));
        let known_orgs = alternation(&known)
            .map(|alt| Regex::new(&format!(r"\b(?:{alt})\b")))
            .transpose()?;

        let heads: Vec<&str> = lexicon.organization_heads.iter().map(String::as_str).collect();
        let headed_orgs = alternation(&heads)
            .map(|alt| {
                Regex::new(&format!(
                    r"\b(?:{CAP_WORD}[ \t]+){{0,3}}(?:{alt})[ \t]+of[ \t]+(?:the[ \t]+)?{CAP_WORD}(?:[ \t]+{CAP_WORD}){{0,3}}"
                ))
            })
            .transpose()?;

        let suffixes: Vec<&str> = lexicon
            .organization_suffixes
            .iter()
            .map(|s| s.trim_end_matches('.'))
            .collect();
        let suffixed_orgs = alternation(&suffixes)
            .map(|alt| Regex::new(&format!(r"\b(?:{CAP_WORD}[ \t]+){{1,4}}(?i:{alt})\b")))
            .transpose()?;

        Ok(Self {
            given_names,
            known_orgs,
            headed_orgs,
            suffixed_orgs,
        })
    }

    pub fn with_builtin_lexicon() -> Result<Self, LexiconError> {
        Self::new(Lexicon::builtin()?)
    }

    fn is_given_name(&self, word: &str) -> bool {
        self.given_names.contains(&word.to_lowercase())
    }

    fn date_candidates(text: &str, out: &mut Vec<Candidate>) {
        out.extend(DATE.find_iter(text).map(|m| Candidate {
            start: m.start(),
            end: m.end(),
            label: EntityLabel::Date,
        }));
        out.extend(TIME.find_iter(text).map(|m| Candidate {
            start: m.start(),
            end: m.end(),
            label: EntityLabel::Time,
        }));
    }

    fn organization_candidates(&self, text: &str, out: &mut Vec<Candidate>) {
        let patterns = [&self.known_orgs, &self.headed_orgs, &self.suffixed_orgs];
        for re in patterns.into_iter().flatten() {
            for m in re.find_iter(text) {
                let start = m.start() + leading_noise_len(m.as_str());
                if start < m.end() {
                    out.push(Candidate {
                        start,
                        end: m.end(),
                        label: EntityLabel::Organization,
                    });
                }
            }
        }
    }

    fn person_candidates(&self, text: &str, out: &mut Vec<Candidate>) {
        for re in [&*PERSON, &*PERSON_UPPER] {
            let mut pos = 0;
            while let Some(caps) = re.captures_at(text, pos) {
                let (Some(whole), Some(first)) = (caps.get(0), caps.get(1)) else {
                    break;
                };
                if self.is_given_name(first.as_str()) {
                    out.push(Candidate {
                        start: whole.start(),
                        end: whole.end(),
                        label: EntityLabel::Person,
                    });
                    pos = whole.end();
                } else {
                    // Retry from the second word, so "Engineer Jane Doe" still finds the name.
                    pos = first.end();
                }
            }
        }
    }
}

impl EntityRecognizer for RuleRecognizer {
    fn capability(&self) -> Capability {
        Capability::Full
    }

    fn analyze(&self, text: &str) -> Analysis {
        let mut candidates = Vec::new();
        Self::date_candidates(text, &mut candidates);
        self.organization_candidates(text, &mut candidates);
        self.person_candidates(text, &mut candidates);

        let sentences = split_sentences(text);
        let entities = resolve(candidates)
            .into_iter()
            .map(|c| RecognizedEntity {
                text: text[c.start..c.end].to_string(),
                label: c.label,
                start: c.start,
                end: c.end,
                sentence: sentence_index(&sentences, c.start),
            })
            .collect();

        Analysis {
            tokens: tokenize(text),
            sentences,
            entities,
        }
    }
}

fn alternation(words: &[&str]) -> Option<String> {
    let escaped: Vec<String> = words
        .iter()
        .filter(|w| !w.is_empty())
        .map(|w| regex::escape(w))
        .collect();
    if escaped.is_empty() {
        None
    } else {
        Some(escaped.join("|"))
    }
}

fn leading_noise_len(span: &str) -> usize {
    let mut offset = 0;
    for word in span.split_inclusive([' ', '\t']) {
        let trimmed = word.trim();
        if !trimmed.is_empty() && !ORG_LEADING_NOISE.contains(&trimmed.to_lowercase().as_str()) {
            break;
        }
        offset += word.len();
    }
    offset
}

/// Keep the highest-priority, longest candidates that do not overlap anything
/// already kept, and return them in text order.
fn resolve(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        a.priority()
            .cmp(&b.priority())
            .then(b.len().cmp(&a.len()))
            .then(a.start.cmp(&b.start))
    });

    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        if !kept.iter().any(|k| k.overlaps(&candidate)) {
            kept.push(candidate);
        }
    }

    kept.sort_by_key(|c| (c.start, c.end));
    kept
}

fn sentence_index(sentences: &[Sentence], offset: usize) -> usize {
    sentences
        .partition_point(|s| s.start <= offset)
        .saturating_sub(1)
}
