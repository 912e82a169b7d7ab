// file: src/analysis/patterns.rs
// description: compiled regex patterns for text cleaning
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

/// Character class body for Hangul syllables.
pub const HANGUL_SYLLABLES: &str = "가-힣";

lazy_static! {
    // Angle-bracket markup such as the <b> highlight tags in search results
    pub static ref MARKUP_TAG: Regex = Regex::new(
        r"<[^>]+>"
    ).expect("MARKUP_TAG regex is valid");

    pub static ref HANGUL_FILTER: Regex = script_filter(HANGUL_SYLLABLES)
        .expect("HANGUL_FILTER regex is valid");
}

/// Matches every character that is neither whitespace nor inside `class`.
pub fn script_filter(class: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"[^{}\s]", class))
}

/// Deletes markup tags without leaving whitespace behind.
pub fn strip_markup(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").into_owned()
}
