// NewsLens Data Models
// Values produced and consumed by the analysis engine

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::classifier::ClassifierError;

const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

// ============ Text Statistics ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextStatistics {
    pub word_count: usize,
    pub char_count: usize,
    pub sentence_count: usize,
    pub avg_word_length: f64,
    pub reading_time_minutes: u32,
}

// ============ Indicators ============

/// Importance tier of an indicator. Declaration order gives `High > Medium > Low`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule produced an indicator
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    AllCaps,
    ExcessivePunctuation,
    SensationalLanguage,
    EmotionalLanguage,
    ExcessiveQuestions,
    ContainsUrls,
}

impl IndicatorKind {
    pub fn label(self) -> &'static str {
        match self {
            IndicatorKind::AllCaps => "Excessive ALL CAPS",
            IndicatorKind::ExcessivePunctuation => "Excessive Punctuation",
            IndicatorKind::SensationalLanguage => "Sensational Language",
            IndicatorKind::EmotionalLanguage => "High Emotional Language",
            IndicatorKind::ExcessiveQuestions => "Excessive Questions",
            IndicatorKind::ContainsUrls => "Contains URLs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    pub kind: IndicatorKind,
    pub label: String,
    pub severity: Severity,
    pub detail: String,
}

impl Indicator {
    pub fn new(kind: IndicatorKind, severity: Severity, detail: impl Into<String>) -> Self {
        Self {
            kind,
            label: kind.label().to_string(),
            severity,
            detail: detail.into(),
        }
    }
}

// ============ Classifier Outcome ============

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Fake,
    Real,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Fake => "fake",
            Verdict::Real => "real",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label plus probability pair handed over by the classifier.
/// Deserializing goes through [`ClassifierOutcome::new`], so invalid pairs are rejected.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "OutcomeFields")]
pub struct ClassifierOutcome {
    pub predicted_label: Verdict,
    pub probability_fake: f64,
    pub probability_real: f64,
}

impl ClassifierOutcome {
    /// Build an outcome, rejecting probabilities outside `[0, 1]` or not summing to 1.
    pub fn new(
        predicted_label: Verdict,
        probability_fake: f64,
        probability_real: f64,
    ) -> Result<Self, ClassifierError> {
        let in_range = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
        if !in_range(probability_fake)
            || !in_range(probability_real)
            || (probability_fake + probability_real - 1.0).abs() > PROBABILITY_SUM_TOLERANCE
        {
            return Err(ClassifierError::InvalidProbabilities {
                fake: probability_fake,
                real: probability_real,
            });
        }

        Ok(Self {
            predicted_label,
            probability_fake,
            probability_real,
        })
    }

    /// Argmax over `[p_fake, p_real]`; a tie goes to fake (class 0).
    pub fn from_probabilities(probability_fake: f64, probability_real: f64) -> Result<Self, ClassifierError> {
        let label = if probability_real > probability_fake {
            Verdict::Real
        } else {
            Verdict::Fake
        };
        Self::new(label, probability_fake, probability_real)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeFields {
    predicted_label: Verdict,
    probability_fake: f64,
    probability_real: f64,
}

impl TryFrom<OutcomeFields> for ClassifierOutcome {
    type Error = ClassifierError;

    fn try_from(fields: OutcomeFields) -> Result<Self, Self::Error> {
        Self::new(fields.predicted_label, fields.probability_fake, fields.probability_real)
    }
}

// ============ Analysis Result ============

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn from_percent(confidence_percent: f64) -> Self {
        if confidence_percent > 75.0 {
            ConfidenceLevel::High
        } else if confidence_percent > 50.0 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub verdict: Verdict,
    /// `max(p_fake, p_real) * 100`
    pub confidence_percent: f64,
    pub probability_fake_percent: f64,
    pub statistics: TextStatistics,
    /// Rule-evaluation order, not ranked by severity.
    pub indicators: Vec<Indicator>,
    pub has_major_indicators: bool,
}

impl AnalysisResult {
    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_percent(self.confidence_percent)
    }
}
