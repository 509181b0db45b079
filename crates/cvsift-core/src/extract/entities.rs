use std::collections::BTreeSet;

use crate::nlp::{Analysis, EntityLabel, EntityRecognizer};

const MAX_NAME_TOKENS: usize = 4;

/// First person recognized in the opening `window_chars` characters, else the
/// first line of the document when it is short and contains a letter.
pub fn extract_name(
    text: &str,
    recognizer: &dyn EntityRecognizer,
    window_chars: usize,
) -> Option<String> {
    let window = char_prefix(text, window_chars);
    if let Some(person) = recognizer.analyze(window).first_labeled(EntityLabel::Person) {
        return Some(person.text.clone());
    }

    let first_line = text.trim().lines().next()?.trim();
    let plausible = first_line.split_whitespace().count() <= MAX_NAME_TOKENS
        && first_line.chars().any(char::is_alphabetic);
    plausible.then(|| first_line.to_string())
}

pub fn extract_organizations(analysis: &Analysis) -> BTreeSet<String> {
    distinct(analysis, EntityLabel::Organization)
}

pub fn extract_dates(analysis: &Analysis) -> BTreeSet<String> {
    distinct(analysis, EntityLabel::Date)
}

fn distinct(analysis: &Analysis, label: EntityLabel) -> BTreeSet<String> {
    analysis
        .entities_labeled(label)
        .map(|e| e.text.clone())
        .collect()
}

/// The first `chars` characters of `text`.
pub(crate) fn char_prefix(text: &str, chars: usize) -> &str {
    text.char_indices()
        .nth(chars)
        .map_or(text, |(end, _)| &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{BlankRecognizer, RuleRecognizer};

    fn rules() -> RuleRecognizer {
        RuleRecognizer::with_builtin_lexicon().unwrap()
    }

    #[test]
    fn test_name_from_recognizer() {
        let text = "Curriculum Vitae\nJane Doe\nSoftware engineer";
        assert_eq!(
            extract_name(text, &rules(), 1000).as_deref(),
            Some("Jane Doe")
        );
    }

    #[test]
    fn test_name_outside_window_uses_first_line() {
        let text = "Curriculum Vitae\nJane Doe";
        assert_eq!(
            extract_name(text, &rules(), 10).as_deref(),
            Some("Curriculum Vitae")
        );
    }

    #[test]
    fn test_degraded_name_fallback() {
        let text = "  Zyx Quorple\nzyx@example.com";
        assert_eq!(
            extract_name(text, &BlankRecognizer, 1000).as_deref(),
            Some("Zyx Quorple")
        );
    }

    #[test]
    fn test_first_line_rejected() {
        let long = "Experienced engineer with a decade of backend work\nmore";
        assert_eq!(extract_name(long, &BlankRecognizer, 1000), None);
        assert_eq!(extract_name("2019 - 2021\n", &BlankRecognizer, 1000), None);
        assert_eq!(extract_name("", &BlankRecognizer, 1000), None);
        assert_eq!(extract_name("   \n ", &BlankRecognizer, 1000), None);
    }

    #[test]
    fn test_organizations_and_dates() {
        let analysis = rules().analyze("Acme Inc, 2019 - 2021.\nGoogle in 2022. Acme Inc again at 9:00 am.");

        assert_eq!(
            extract_organizations(&analysis),
            ["Acme Inc".to_string(), "Google".to_string()].into()
        );
        assert_eq!(
            extract_dates(&analysis),
            ["2019 - 2021".to_string(), "2022".to_string()].into()
        );
    }

    #[test]
    fn test_char_prefix_is_char_safe() {
        assert_eq!(char_prefix("Zoë Ärn", 3), "Zoë");
        assert_eq!(char_prefix("abc", 10), "abc");
        assert_eq!(char_prefix("abc", 0), "");
    }
}
