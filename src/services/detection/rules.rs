// Indicator Rules
// Six independent detectors. Each one sees only the raw text, its statistics and
// the policy, so the triggered set does not depend on evaluation order.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use super::policy::IndicatorPolicy;
use crate::models::{Indicator, IndicatorKind, Severity, TextStatistics};

pub type Rule = fn(&str, &TextStatistics, &IndicatorPolicy) -> Option<Indicator>;

/// Rules in evaluation order; indicators are reported in this order.
pub const RULES: [Rule; 6] = [
    check_all_caps,
    check_excessive_punctuation,
    check_sensational_language,
    check_emotional_language,
    check_excessive_questions,
    check_urls,
];

const URL_MARKERS: [&str; 3] = ["http", "www", ".com"];

static ALL_CAPS_RE: OnceLock<Regex> = OnceLock::new();
static PUNCTUATION_RUN_RE: OnceLock<Regex> = OnceLock::new();
static PRONOUN_RE: OnceLock<Regex> = OnceLock::new();

fn all_caps_re() -> &'static Regex {
    ALL_CAPS_RE.get_or_init(|| Regex::new(r"\b[A-Z]{2,}\b").expect("all caps pattern"))
}

fn punctuation_run_re() -> &'static Regex {
    PUNCTUATION_RUN_RE.get_or_init(|| Regex::new(r"[!?]{2,}").expect("punctuation run pattern"))
}

fn pronoun_re() -> &'static Regex {
    PRONOUN_RE.get_or_init(|| Regex::new(r"(?i)\b(I|you|we|they)\b").expect("pronoun pattern"))
}

/// `count > base * ratio`, never true when `base` is zero.
fn exceeds_share(count: usize, base: usize, ratio: f64) -> bool {
    base > 0 && count as f64 > base as f64 * ratio
}

/// Run every rule and keep the ones that fired
pub fn evaluate_rules(text: &str, stats: &TextStatistics, policy: &IndicatorPolicy) -> Vec<Indicator> {
    RULES
        .iter()
        .filter_map(|rule| rule(text, stats, policy))
        .inspect(|indicator| {
            debug!(
                kind = ?indicator.kind,
                severity = %indicator.severity,
                detail = %indicator.detail,
                "indicator.triggered"
            );
        })
        .collect()
}

pub fn check_all_caps(text: &str, stats: &TextStatistics, policy: &IndicatorPolicy) -> Option<Indicator> {
    let caps_words = all_caps_re().find_iter(text).count();
    if !exceeds_share(caps_words, stats.word_count, policy.caps_ratio) {
        return None;
    }
    Some(Indicator::new(
        IndicatorKind::AllCaps,
        Severity::High,
        format!("{} words in caps", caps_words),
    ))
}

pub fn check_excessive_punctuation(
    text: &str,
    _stats: &TextStatistics,
    policy: &IndicatorPolicy,
) -> Option<Indicator> {
    let runs = punctuation_run_re().find_iter(text).count();
    if runs <= policy.punctuation_min_runs {
        return None;
    }
    Some(Indicator::new(
        IndicatorKind::ExcessivePunctuation,
        Severity::Medium,
        format!("{} occurrences", runs),
    ))
}

/// Substring match, so "revealed" also matches inside "unrevealed".
pub fn check_sensational_language(
    text: &str,
    _stats: &TextStatistics,
    policy: &IndicatorPolicy,
) -> Option<Indicator> {
    let lowered = text.to_lowercase();
    let found = policy
        .sensational_terms
        .iter()
        .filter(|term| !term.is_empty())
        .filter(|term| lowered.contains(term.to_lowercase().as_str()))
        .count();
    if found == 0 {
        return None;
    }
    Some(Indicator::new(
        IndicatorKind::SensationalLanguage,
        Severity::Medium,
        format!("{} sensational words", found),
    ))
}

pub fn check_emotional_language(
    text: &str,
    stats: &TextStatistics,
    policy: &IndicatorPolicy,
) -> Option<Indicator> {
    let pronouns = pronoun_re().find_iter(text).count();
    if !exceeds_share(pronouns, stats.word_count, policy.pronoun_ratio) {
        return None;
    }
    Some(Indicator::new(
        IndicatorKind::EmotionalLanguage,
        Severity::Low,
        format!("{} emotional words", pronouns),
    ))
}

/// Any `?` also ends a sentence, so `sentence_count` is at least 1 whenever this can fire.
pub fn check_excessive_questions(
    text: &str,
    stats: &TextStatistics,
    policy: &IndicatorPolicy,
) -> Option<Indicator> {
    let questions = text.matches('?').count();
    if !exceeds_share(questions, stats.sentence_count, policy.question_ratio) {
        return None;
    }
    Some(Indicator::new(
        IndicatorKind::ExcessiveQuestions,
        Severity::Medium,
        format!("{} questions", questions),
    ))
}

/// Case-sensitive: "HTTP" or "WWW" alone does not count.
pub fn check_urls(text: &str, _stats: &TextStatistics, _policy: &IndicatorPolicy) -> Option<Indicator> {
    if !URL_MARKERS.iter().any(|marker| text.contains(marker)) {
        return None;
    }
    Some(Indicator::new(IndicatorKind::ContainsUrls, Severity::Low, "Links detected"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::text_processor::compute_statistics;

    fn run(rule: Rule, text: &str) -> Option<Indicator> {
        let stats = compute_statistics(text);
        rule(text, &stats, &IndicatorPolicy::default())
    }

    fn twenty_words_with_caps(caps: usize) -> String {
        let mut words: Vec<String> = (0..caps).map(|_| "NASA".to_string()).collect();
        words.extend((caps..20).map(|_| "plain".to_string()));
        words.join(" ")
    }

    #[test]
    fn test_all_caps_triggers_above_ten_percent() {
        let text = twenty_words_with_caps(3);
        let indicator = run(check_all_caps, &text).expect("3 of 20 should trigger");
        assert_eq!(indicator.severity, Severity::High);
        assert_eq!(indicator.detail, "3 words in caps");
    }

    #[test]
    fn test_all_caps_quiet_below_threshold() {
        assert!(run(check_all_caps, &twenty_words_with_caps(1)).is_none());
        // exactly 10% is not "more than"
        assert!(run(check_all_caps, &twenty_words_with_caps(2)).is_none());
    }

    #[test]
    fn test_all_caps_ignores_single_letters() {
        assert!(run(check_all_caps, "I A").is_none());
    }

    #[test]
    fn test_punctuation_needs_more_than_three_runs() {
        assert!(run(check_excessive_punctuation, "a!! b?? c!?").is_none());
        let indicator = run(check_excessive_punctuation, "a!! b?? c!? d!!!").unwrap();
        assert_eq!(indicator.detail, "4 occurrences");
        assert_eq!(indicator.severity, Severity::Medium);
    }

    #[test]
    fn test_sensational_is_case_insensitive_and_distinct() {
        let indicator = run(check_sensational_language, "BREAKING: Shocking revelation").unwrap();
        assert_eq!(indicator.detail, "2 sensational words");
        let indicator = run(check_sensational_language, "shocking, shocking, SHOCKING").unwrap();
        assert_eq!(indicator.detail, "1 sensational words");
        assert!(run(check_sensational_language, "The council met on Tuesday.").is_none());
    }

    #[test]
    fn test_sensational_matches_phrases() {
        let indicator = run(check_sensational_language, "You Wont Believe this must-see clip").unwrap();
        assert_eq!(indicator.detail, "2 sensational words");
    }

    #[test]
    fn test_sensational_terms_keep_their_padding() {
        let text = "wowzers, what a day";
        let stats = compute_statistics(text);
        let padded = IndicatorPolicy {
            sensational_terms: vec![" wow ".to_string(), String::new()],
            ..IndicatorPolicy::default()
        };
        assert!(check_sensational_language(text, &stats, &padded).is_none());

        let spaced = "well, wow what a day";
        let indicator = check_sensational_language(spaced, &compute_statistics(spaced), &padded).unwrap();
        assert_eq!(indicator.detail, "1 sensational words");
    }

    #[test]
    fn test_emotional_language_counts_whole_words() {
        // 2 pronouns over 10 words = 20%
        let text = "You and THEY walked to the old mill yesterday morning";
        let indicator = run(check_emotional_language, text).unwrap();
        assert_eq!(indicator.detail, "2 emotional words");
        assert_eq!(indicator.severity, Severity::Low);
        // "your", "theyre", "wet" are not whole-word pronouns
        assert!(run(check_emotional_language, "your theyre wet item").is_none());
    }

    #[test]
    fn test_questions_relative_to_sentences() {
        // 1 question over 2 sentences: 1 > 1.0 is false
        assert!(run(check_excessive_questions, "Is it true? It is.").is_none());
        let indicator = run(check_excessive_questions, "Why? How? It is.").unwrap();
        assert_eq!(indicator.detail, "2 questions");
    }

    #[test]
    fn test_single_question_without_other_sentences_fires() {
        // the lone `?` closes the only sentence, so 1 > 0.5
        let indicator = run(check_excessive_questions, "Is this real?").unwrap();
        assert_eq!(indicator.detail, "1 questions");
        assert!(run(check_excessive_questions, "no punctuation at all").is_none());
    }

    #[test]
    fn test_urls() {
        assert!(run(check_urls, "see www.example.com now").is_some());
        assert!(run(check_urls, "source: http://x.org").is_some());
        assert!(run(check_urls, "Visit the local library today.").is_none());
        assert!(run(check_urls, "WWW HTTP").is_none());
    }

    #[test]
    fn test_zero_words_never_trigger_ratios() {
        let stats = TextStatistics::default();
        let policy = IndicatorPolicy::default();
        assert!(check_all_caps("", &stats, &policy).is_none());
        assert!(check_emotional_language("", &stats, &policy).is_none());
        assert!(check_excessive_questions("", &stats, &policy).is_none());
    }

    #[test]
    fn test_policy_overrides_boundaries() {
        let text = twenty_words_with_caps(2);
        let stats = compute_statistics(&text);
        let strict = IndicatorPolicy {
            caps_ratio: 0.05,
            ..IndicatorPolicy::default()
        };
        assert!(check_all_caps(&text, &stats, &strict).is_some());

        let lenient = IndicatorPolicy {
            punctuation_min_runs: 10,
            ..IndicatorPolicy::default()
        };
        let shouty = "a!! b?? c!? d!!!";
        assert!(check_excessive_punctuation(shouty, &compute_statistics(shouty), &lenient).is_none());
    }

    #[test]
    fn test_evaluation_order_is_table_order() {
        let text = "BREAKING NEWS!!! SHOCKING?? WOW!! REALLY?? you we they I http";
        let stats = compute_statistics(text);
        let kinds: Vec<IndicatorKind> = evaluate_rules(text, &stats, &IndicatorPolicy::default())
            .into_iter()
            .map(|i| i.kind)
            .collect();
        let mut expected_order: Vec<IndicatorKind> = RULES
            .iter()
            .filter_map(|rule| rule(text, &stats, &IndicatorPolicy::default()))
            .map(|i| i.kind)
            .collect();
        assert_eq!(kinds, expected_order);
        expected_order.reverse();
        let reversed: Vec<IndicatorKind> = RULES
            .iter()
            .rev()
            .filter_map(|rule| rule(text, &stats, &IndicatorPolicy::default()))
            .map(|i| i.kind)
            .collect();
        assert_eq!(reversed, expected_order);
        assert_eq!(kinds.first(), Some(&IndicatorKind::AllCaps));
        assert_eq!(kinds.last(), Some(&IndicatorKind::ContainsUrls));
    }
}
