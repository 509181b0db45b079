//! Field extractors. Each one is a pure function over the segmented sections,
//! the normalized text or a recognizer [`Analysis`](crate::nlp::Analysis), and
//! reports "nothing found" as `None` or an empty collection.

mod contact;
mod education;
mod entities;
mod experience;
mod skills;

pub use contact::{extract_email, extract_phone};
pub use education::extract_education;
pub use entities::{extract_dates, extract_name, extract_organizations};
pub use experience::extract_experience;
pub use skills::{extract_skills, SkillMatcher, KNOWN_SKILLS};

use crate::ingest::Section;

/// Sections whose heading contains any of `needles`.
pub(crate) fn sections_matching<'a>(
    sections: &'a [Section],
    needles: &'a [&'a str],
) -> impl Iterator<Item = &'a Section> {
    sections
        .iter()
        .filter(move |s| needles.iter().any(|n| s.heading_contains(n)))
}
