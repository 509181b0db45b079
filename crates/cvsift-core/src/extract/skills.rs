use std::collections::BTreeSet;

use super::sections_matching;
use crate::ingest::Section;

/// Keywords for the whole-document scan used when no skills section yields
/// anything.
pub const KNOWN_SKILLS: &[&str] = &[
    "python",
    "java",
    "c++",
    "c#",
    "javascript",
    "react",
    "node",
    "sql",
    "postgres",
    "mongodb",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "linux",
    "git",
    "html",
    "css",
    "tensorflow",
    "pytorch",
    "nlp",
    "spacy",
    "pandas",
];

const SKILL_HEADINGS: &[&str] = &["skill", "technical"];

const SEPARATORS: &[char] = &[',', '\n', ';', '•', '◦', '▪', '‣', '●', '·'];

/// Case-insensitive keyword scanner. A keyword matches only when it is not
/// glued to other word characters, so `c++` matches in "C++, Rust" but `git`
/// does not match inside "github".
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    vocabulary: Vec<String>,
}

impl SkillMatcher {
    pub fn new(extra: &[String]) -> Self {
        let mut vocabulary: Vec<String> = KNOWN_SKILLS.iter().map(|s| (*s).to_string()).collect();
        for skill in extra {
            let skill = skill.trim().to_lowercase();
            if !skill.is_empty() && !vocabulary.contains(&skill) {
                vocabulary.push(skill);
            }
        }
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn scan(&self, text: &str) -> BTreeSet<String> {
        let haystack = text.to_lowercase();
        self.vocabulary
            .iter()
            .filter(|keyword| contains_keyword(&haystack, keyword))
            .cloned()
            .collect()
    }
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::new(&[])
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    haystack.match_indices(keyword).any(|(start, found)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + found.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

/// Skills listed under a skills heading, or, failing that, known keywords
/// found anywhere in `text`.
pub fn extract_skills(sections: &[Section], text: &str, matcher: &SkillMatcher) -> BTreeSet<String> {
    let listed: BTreeSet<String> = sections_matching(sections, SKILL_HEADINGS)
        .flat_map(|section| section.content.split(SEPARATORS))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect();

    if listed.is_empty() {
        matcher.scan(text)
    } else {
        listed
    }
}
