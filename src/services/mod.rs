// NewsLens Core Services

pub mod text_processor;
pub mod config_store;
pub mod classifier;
pub mod detection;
pub mod document_loader;
pub mod report;

pub use text_processor::*;
pub use config_store::*;
pub use classifier::*;
pub use document_loader::*;
pub use report::*;

// Re-export detection module items
pub use detection::{
    aggregate,
    analyze,
    evaluate_rules,
    Aggregation,
    AnalyzeError,
    Analyzer,
    IndicatorPolicy,
};
