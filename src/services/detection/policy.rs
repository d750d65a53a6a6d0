// Indicator policy
// Thresholds and vocabulary used by the heuristic rules. Loaded from the config
// file with per-field defaults, so a partial `indicators` block is valid.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CAPS_RATIO: f64 = 0.10;
pub const DEFAULT_PUNCTUATION_MIN_RUNS: usize = 3;
pub const DEFAULT_PRONOUN_RATIO: f64 = 0.05;
pub const DEFAULT_QUESTION_RATIO: f64 = 0.5;

pub const DEFAULT_SENSATIONAL_TERMS: &[&str] = &[
    "shocking",
    "unbelievable",
    "exclusive",
    "breaking",
    "revealed",
    "secret",
    "scandal",
    "bombshell",
    "must-see",
    "you wont believe",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorPolicy {
    /// ALL-CAPS tokens must exceed this share of `word_count`.
    #[serde(default = "default_caps_ratio")]
    pub caps_ratio: f64,
    /// Runs of `!`/`?` must exceed this count.
    #[serde(default = "default_punctuation_min_runs")]
    pub punctuation_min_runs: usize,
    #[serde(default = "default_sensational_terms")]
    pub sensational_terms: Vec<String>,
    /// Personal pronouns must exceed this share of `word_count`.
    #[serde(default = "default_pronoun_ratio")]
    pub pronoun_ratio: f64,
    /// `?` count must exceed this share of `sentence_count`.
    #[serde(default = "default_question_ratio")]
    pub question_ratio: f64,
}

impl Default for IndicatorPolicy {
    fn default() -> Self {
        Self {
            caps_ratio: DEFAULT_CAPS_RATIO,
            punctuation_min_runs: DEFAULT_PUNCTUATION_MIN_RUNS,
            sensational_terms: default_sensational_terms(),
            pronoun_ratio: DEFAULT_PRONOUN_RATIO,
            question_ratio: DEFAULT_QUESTION_RATIO,
        }
    }
}

fn default_caps_ratio() -> f64 { DEFAULT_CAPS_RATIO }
fn default_punctuation_min_runs() -> usize { DEFAULT_PUNCTUATION_MIN_RUNS }
fn default_pronoun_ratio() -> f64 { DEFAULT_PRONOUN_RATIO }
fn default_question_ratio() -> f64 { DEFAULT_QUESTION_RATIO }
fn default_sensational_terms() -> Vec<String> {
    DEFAULT_SENSATIONAL_TERMS.iter().map(|s| s.to_string()).collect()
}
