use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub text: String,
    pub year: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub text: String,
    pub dates: BTreeSet<String>,
}

/// Structured candidate data extracted from one resume.
///
/// Every field other than `source_path` may be empty; a heuristic that finds
/// nothing leaves its field absent instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub source_path: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: BTreeSet<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub organizations: BTreeSet<String>,
    pub dates_mentioned: BTreeSet<String>,
    pub raw_text_snippet: String,
}

impl ParsedResume {
    #[must_use]
    pub fn new(source_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            name: None,
            email: None,
            phone: None,
            skills: BTreeSet::new(),
            education: Vec::new(),
            experience: Vec::new(),
            organizations: BTreeSet::new(),
            dates_mentioned: BTreeSet::new(),
            raw_text_snippet: String::new(),
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn to_row(&self) -> TabularRow {
        TabularRow::from(self)
    }
}

/// One-row flattening of a [`ParsedResume`] for spreadsheet export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularRow {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: String,
    pub organizations: String,
    pub dates: String,
    pub education_count: usize,
    pub experience_count: usize,
}

impl TabularRow {
    /// Column names in serialization order.
    pub const COLUMNS: [&'static str; 8] = [
        "name",
        "email",
        "phone",
        "skills",
        "organizations",
        "dates",
        "education_count",
        "experience_count",
    ];
}

impl From<&ParsedResume> for TabularRow {
    fn from(record: &ParsedResume) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            skills: join(&record.skills),
            organizations: join(&record.organizations),
            dates: join(&record.dates_mentioned),
            education_count: record.education.len(),
            experience_count: record.experience.len(),
        }
    }
}

fn join(values: &BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParsedResume {
        let mut record = ParsedResume::new("cv/jane.pdf");
        record.name = Some("Jane Doe".into());
        record.skills = ["sql".to_string(), "python".to_string()].into();
        record.organizations = ["Acme Corp".to_string()].into();
        record.education.push(EducationEntry {
            text: "MIT, 2019".into(),
            year: Some("2019".into()),
        });
        record
    }

    #[test]
    fn test_json_field_names_and_nulls() {
        let value: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();

        assert_eq!(value["source_path"], "cv/jane.pdf");
        assert_eq!(value["name"], "Jane Doe");
        assert!(value["email"].is_null());
        assert!(value["phone"].is_null());
        assert_eq!(value["skills"], serde_json::json!(["python", "sql"]));
        assert_eq!(value["education"][0]["year"], "2019");
        assert!(value["experience"].as_array().unwrap().is_empty());
        assert!(value["dates_mentioned"].as_array().unwrap().is_empty());
        assert_eq!(value["raw_text_snippet"], "");
    }

    #[test]
    fn test_tabular_row_flattening() {
        let row = sample().to_row();

        assert_eq!(row.name.as_deref(), Some("Jane Doe"));
        assert_eq!(row.email, None);
        assert_eq!(row.skills, "python;sql");
        assert_eq!(row.organizations, "Acme Corp");
        assert_eq!(row.dates, "");
        assert_eq!(row.education_count, 1);
        assert_eq!(row.experience_count, 0);
    }

    #[test]
    fn test_columns_match_row_fields() {
        let value = serde_json::to_value(sample().to_row()).unwrap();
        let mut fields: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let mut columns = TabularRow::COLUMNS.to_vec();
        fields.sort_unstable();
        columns.sort_unstable();
        assert_eq!(fields, columns);
    }

    #[test]
    fn test_empty_record() {
        let record = ParsedResume::new("x.txt");
        assert_eq!(record.source_path, "x.txt");
        assert!(record.skills.is_empty());
        assert!(record.name.is_none());
    }
}
