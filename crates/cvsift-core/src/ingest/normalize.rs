use std::sync::LazyLock;

use regex::Regex;

static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank line regex"));

/// Unify line endings, squeeze runs of blank lines down to one and trim the
/// whole document.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let squeezed = EXCESS_BLANK_LINES.replace_all(&unified, "\n\n");
    squeezed.trim().to_string()
}
