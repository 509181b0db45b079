use std::sync::LazyLock;

use regex::Regex;

use super::sections_matching;
use crate::ingest::Section;
use crate::record::EducationEntry;

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid year regex"));

/// One entry per non-empty line of every education section.
pub fn extract_education(sections: &[Section]) -> Vec<EducationEntry> {
    sections_matching(sections, &["education"])
        .flat_map(|section| section.content.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| EducationEntry {
            text: line.to_string(),
            year: YEAR.find(line).map(|m| m.as_str().to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_per_line() {
        let sections = vec![Section::new(
            "education",
            "B.Sc. Computer Science, Tech University, 2017\n\n  High School Diploma  ",
        )];
        let entries = extract_education(&sections);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "B.Sc. Computer Science, Tech University, 2017");
        assert_eq!(entries[0].year.as_deref(), Some("2017"));
        assert_eq!(entries[1].text, "High School Diploma");
        assert_eq!(entries[1].year, None);
    }

    #[test]
    fn test_year_must_stand_alone() {
        let sections = vec![Section::new("education", "Class of 12019\nMIT 1999-2003")];
        let entries = extract_education(&sections);

        assert_eq!(entries[0].year, None);
        assert_eq!(entries[1].year.as_deref(), Some("1999"));
    }

    #[test]
    fn test_no_education_section() {
        let sections = vec![Section::new("header", "MIT, 2019")];
        assert!(extract_education(&sections).is_empty());
    }
}
