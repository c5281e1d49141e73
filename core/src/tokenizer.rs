use lazy_static::lazy_static;
use regex::Regex;

/// Shortest token kept as an index term, in characters.
pub const MIN_TERM_CHARS: usize = 3;

lazy_static! {
    static ref RE: Regex = Regex::new(r"\w+").expect("valid regex");
}

/// Tokenize text into index terms: lowercase, maximal word-character runs,
/// dropping anything shorter than [`MIN_TERM_CHARS`].
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.to_lowercase();
    RE.find_iter(&normalized)
        .map(|m| m.as_str())
        .filter(|token| token.chars().count() >= MIN_TERM_CHARS)
        .map(str::to_string)
        .collect()
}
