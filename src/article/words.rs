use regex::Regex;
use std::sync::OnceLock;

/// ASCII word characters, matching the classic `\w` class
static WORD_RE: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    WORD_RE.get_or_init(|| Regex::new(r"[A-Za-z0-9_]+").expect("valid word regex"))
}

/// Count maximal runs of word characters in `text`.
///
/// Text without any word character counts as zero words.
///
/// ```
/// use ipsum_blog::article::word_count;
///
/// assert_eq!(word_count("one two three"), 3);
/// assert_eq!(word_count("don't"), 2);
/// assert_eq!(word_count("--- !!"), 0);
/// ```
pub fn word_count(text: &str) -> usize {
    word_regex().find_iter(text).count()
}
