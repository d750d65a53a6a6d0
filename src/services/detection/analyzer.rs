// Analysis Orchestrator
// statistics -> rules -> aggregation, merged with the classifier outcome

use thiserror::Error;
use tracing::{debug, info};

use super::aggregation::aggregate;
use super::policy::IndicatorPolicy;
use super::rules::evaluate_rules;
use crate::models::{AnalysisResult, ClassifierOutcome};
use crate::services::classifier::{ClassifierError, NewsClassifier};
use crate::services::text_processor::{compute_statistics, is_analyzable};

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Please enter some text to analyze. Make sure the article has meaningful content.")]
    BlankInput,
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Analyze `text` against an already computed classifier outcome.
///
/// Pure and total: identical inputs always produce identical results, and the
/// outcome only feeds the verdict and percentages, never the indicators.
pub fn analyze(text: &str, outcome: &ClassifierOutcome, policy: &IndicatorPolicy) -> AnalysisResult {
    let statistics = compute_statistics(text);
    debug!(
        words = statistics.word_count,
        chars = statistics.char_count,
        sentences = statistics.sentence_count,
        "statistics.computed"
    );

    let indicators = evaluate_rules(text, &statistics, policy);
    let aggregation = aggregate(&indicators);

    let confidence_percent = outcome.probability_fake.max(outcome.probability_real) * 100.0;
    let probability_fake_percent = outcome.probability_fake * 100.0;

    info!(
        verdict = %outcome.predicted_label,
        confidence_percent,
        indicators = indicators.len(),
        highest_severity = ?aggregation.highest_severity,
        "analysis.completed"
    );

    AnalysisResult {
        verdict: outcome.predicted_label,
        confidence_percent,
        probability_fake_percent,
        statistics,
        indicators,
        has_major_indicators: aggregation.has_major_indicators,
    }
}

/// Runs the injected classifier and then the heuristic engine.
pub struct Analyzer<C> {
    classifier: C,
    policy: IndicatorPolicy,
}

impl<C: NewsClassifier> Analyzer<C> {
    pub fn new(classifier: C) -> Self {
        Self::with_policy(classifier, IndicatorPolicy::default())
    }

    pub fn with_policy(classifier: C, policy: IndicatorPolicy) -> Self {
        Self { classifier, policy }
    }

    pub fn policy(&self) -> &IndicatorPolicy {
        &self.policy
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Blank text is rejected before the classifier runs; classifier errors pass through unchanged.
    pub fn analyze_text(&self, text: &str) -> Result<AnalysisResult, AnalyzeError> {
        if !is_analyzable(text) {
            return Err(AnalyzeError::BlankInput);
        }
        let outcome = self.classifier.classify(text)?;
        Ok(analyze(text, &outcome, &self.policy))
    }
}
