use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+").expect("valid email regex")
});

// Optional country code, optional area code, then a run of digits with separators.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[\s-]?)?(?:\(?\d{2,4}\)?[\s-]?)?[\d\s-]{7,15}")
        .expect("valid phone regex")
});

const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// First phone-shaped match with a plausible digit count, reduced to its
/// digits. A leading `+` is kept.
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE.find_iter(text).find_map(|m| {
        let raw = m.as_str().trim();
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if !PHONE_DIGITS.contains(&digits.len()) {
            return None;
        }
        if raw.starts_with('+') {
            Some(format!("+{digits}"))
        } else {
            Some(digits)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert_eq!(
            extract_email("Contact: jane.doe@example.com for details").as_deref(),
            Some("jane.doe@example.com")
        );
        assert_eq!(
            extract_email("a@b.io then c@d.org").as_deref(),
            Some("a@b.io")
        );
        assert_eq!(extract_email("no address here"), None);
    }

    #[test]
    fn test_phone_with_country_code() {
        assert_eq!(
            extract_phone("Phone: +1 (415) 555-2671").as_deref(),
            Some("+14155552671")
        );
    }

    #[test]
    fn test_phone_without_plus() {
        assert_eq!(
            extract_phone("Jane Doe\n415-555-2671\n").as_deref(),
            Some("4155552671")
        );
    }

    #[test]
    fn test_short_numbers_are_not_phones() {
        assert_eq!(extract_phone("Graduated 2017, GPA 3.9"), None);
        assert_eq!(extract_phone(""), None);
    }
}
