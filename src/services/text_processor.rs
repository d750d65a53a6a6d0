// Text Statistics Service
// Quantitative metrics derived from the raw article text

use regex::Regex;
use std::sync::OnceLock;

use crate::models::TextStatistics;

const WORDS_PER_MINUTE: usize = 200;

static SENTENCE_SPLIT_RE: OnceLock<Regex> = OnceLock::new();

fn sentence_split_re() -> &'static Regex {
    SENTENCE_SPLIT_RE.get_or_init(|| Regex::new(r"[.!?]+").expect("sentence split pattern"))
}

/// False for empty or whitespace-only text, which is never handed to the engine.
pub fn is_analyzable(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Count sentences as the number of `[.!?]+`-delimited segments minus the trailing one.
///
/// Text without terminal punctuation yields a single segment and therefore 0.
pub fn count_sentences(text: &str) -> usize {
    sentence_split_re().split(text).count().saturating_sub(1)
}

/// Compute word, character and sentence counts plus the derived averages
pub fn compute_statistics(text: &str) -> TextStatistics {
    let word_count = text.split_whitespace().count();
    // Characters, not UTF-8 bytes, so non-ASCII text is not over-counted.
    let char_count = text.chars().count();
    let sentence_count = count_sentences(text);

    let avg_word_length = if word_count > 0 {
        char_count as f64 / word_count as f64
    } else {
        0.0
    };
    let reading_time_minutes = std::cmp::max(1, word_count / WORDS_PER_MINUTE) as u32;

    TextStatistics {
        word_count,
        char_count,
        sentence_count,
        avg_word_length,
        reading_time_minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_count_mixed_terminators() {
        assert_eq!(count_sentences("Hello. World! Really?"), 3);
    }

    #[test]
    fn test_sentence_count_without_punctuation_is_zero() {
        assert_eq!(count_sentences("no terminal punctuation here"), 0);
        assert_eq!(count_sentences(""), 0);
    }

    #[test]
    fn test_sentence_count_collapses_runs() {
        assert_eq!(count_sentences("What?!? No way... Yes!!!"), 3);
    }

    #[test]
    fn test_avg_word_length() {
        let stats = compute_statistics("ab cd");
        assert_eq!(stats.word_count, 2);
        assert_eq!(stats.char_count, 5);
        // 5 chars (space included) over 2 words
        assert_eq!(stats.avg_word_length, 2.5);

        let stats = compute_statistics("abcd");
        assert_eq!(stats.avg_word_length, 4.0);
    }

    #[test]
    fn test_empty_text_is_zeroed() {
        let stats = compute_statistics("");
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.char_count, 0);
        assert_eq!(stats.sentence_count, 0);
        assert_eq!(stats.avg_word_length, 0.0);
        assert_eq!(stats.reading_time_minutes, 1);
    }

    #[test]
    fn test_reading_time_floors_at_one_minute() {
        let short = compute_statistics(&"word ".repeat(199));
        assert_eq!(short.reading_time_minutes, 1);
        let long = compute_statistics(&"word ".repeat(650));
        assert_eq!(long.reading_time_minutes, 3);
    }

    #[test]
    fn test_char_count_uses_chars() {
        let stats = compute_statistics("café news");
        assert_eq!(stats.char_count, 9);
        assert_eq!(stats.word_count, 2);
    }

    #[test]
    fn test_is_analyzable() {
        assert!(!is_analyzable(""));
        assert!(!is_analyzable("  \n\t "));
        assert!(is_analyzable(" a "));
    }
}
