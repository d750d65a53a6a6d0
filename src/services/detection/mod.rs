// Detection Module
// Heuristic indicator engine organized into specialized submodules:
// - policy: overridable thresholds and vocabulary
// - rules: the six independent indicator detectors
// - aggregation: folds triggered indicators into the caution signal
// - analyzer: composes statistics, rules and aggregation with the classifier outcome

pub mod policy;
pub mod rules;
pub mod aggregation;
pub mod analyzer;

// Re-export commonly used items
pub use policy::IndicatorPolicy;
pub use rules::{evaluate_rules, Rule, RULES};
pub use aggregation::{aggregate, Aggregation};
pub use analyzer::{analyze, AnalyzeError, Analyzer};
