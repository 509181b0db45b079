use std::sync::LazyLock;

use regex::Regex;

use super::{Sentence, Token};

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\w+(?:[.'&+#@-]\w+)*[+#]*|[^\w\s]").expect("valid token regex")
});

/// Words that end in a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "inc", "ltd", "co", "corp", "vs", "etc",
    "e.g", "i.e", "approx", "dept", "b.sc", "m.sc", "b.a", "m.a", "b.s", "m.s", "ph.d", "b.tech",
    "m.tech", "b.e", "m.e", "no", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept",
    "oct", "nov", "dec",
];

pub fn tokenize(text: &str) -> Vec<Token> {
    TOKEN
        .find_iter(text)
        .map(|m| Token {
            text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Split text into sentences. Every line break ends a sentence; inside a line,
/// terminal punctuation followed by whitespace does too unless it closes an
/// initial or a known abbreviation.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut line_start = 0;

    for line in text.split_inclusive('\n') {
        let mut segment_start = 0;
        let mut chars = line.char_indices().peekable();

        while let Some((i, ch)) = chars.next() {
            if !matches!(ch, '.' | '!' | '?') {
                continue;
            }
            let before_space = chars.peek().is_some_and(|(_, next)| next.is_whitespace());
            if before_space && !ends_with_abbreviation(&line[segment_start..i]) {
                push_segment(&mut sentences, text, line_start + segment_start, line_start + i + 1);
                segment_start = i + 1;
            }
        }

        push_segment(&mut sentences, text, line_start + segment_start, line_start + line.len());
        line_start += line.len();
    }

    sentences
}

fn ends_with_abbreviation(before: &str) -> bool {
    let word = before
        .rsplit(|c: char| !(c.is_alphanumeric() || c == '.'))
        .next()
        .unwrap_or("");

    let mut chars = word.chars();
    if let (Some(first), None) = (chars.next(), chars.next()) {
        return first.is_alphabetic();
    }

    let lowered = word.to_lowercase();
    ABBREVIATIONS.contains(&lowered.as_str())
}

fn push_segment(sentences: &mut Vec<Sentence>, text: &str, start: usize, end: usize) {
    let raw = &text[start..end];
    let trimmed_start = raw.trim_start();
    let lead = raw.len() - trimmed_start.len();
    let trimmed = trimmed_start.trim_end();
    if trimmed.is_empty() {
        return;
    }

    sentences.push(Sentence {
        text: trimmed.to_string(),
        start: start + lead,
        end: start + lead + trimmed.len(),
    });
}
