//! Reading-time estimation.
//!
//! Word counting ignores fenced code blocks and markdown punctuation, then
//! divides by a fixed reading speed, rounding up with a one-minute floor.

use regex::Regex;

/// Assumed reading speed in words per minute.
pub const WORDS_PER_MINUTE: usize = 200;

const STRIPPED_PUNCTUATION: &str = "#*[]()_`";

/// Estimate reading time for a markdown document, in whole minutes.
///
/// Fenced code blocks are excluded entirely; markdown punctuation is
/// treated as whitespace so `**bold**` counts as one word. The result is
/// `ceil(words / 200)`, never less than 1.
///
/// # Example
///
/// ```rust
/// use lyfr_content::estimate_minutes;
///
/// assert_eq!(estimate_minutes("a short note"), 1);
/// ```
pub fn estimate_minutes(markdown: &str) -> usize {
    let fences = Regex::new(r"(?s)```.*?```").expect("Invalid code fence regex");
    let without_code = fences.replace_all(markdown, " ");
    let words = without_code
        .chars()
        .map(|c| if STRIPPED_PUNCTUATION.contains(c) { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .count();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        std::iter::repeat_n("word", n).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_four_hundred_words_is_two_minutes() {
        assert_eq!(estimate_minutes(&words(400)), 2);
    }

    #[test]
    fn test_short_document_floors_at_one_minute() {
        assert_eq!(estimate_minutes(&words(50)), 1);
    }

    #[test]
    fn test_empty_document_is_one_minute() {
        assert_eq!(estimate_minutes(""), 1);
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(estimate_minutes(&words(201)), 2);
    }

    #[test]
    fn test_code_fences_do_not_count() {
        let doc = format!("{}\n\n```\n{}\n```\n", words(100), words(5000));
        assert_eq!(estimate_minutes(&doc), 1);
    }

    #[test]
    fn test_punctuation_does_not_split_count() {
        // "**bold**" is one word once markers are stripped
        assert_eq!(estimate_minutes("**bold** _text_ [link](target)"), 1);
    }
}
