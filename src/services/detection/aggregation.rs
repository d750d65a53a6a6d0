// Aggregation Logic
// Folds triggered indicators into the overall caution signal

use serde::{Deserialize, Serialize};

use crate::models::{Indicator, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    /// True as soon as any rule fired, whatever its severity.
    pub has_major_indicators: bool,
    pub highest_severity: Option<Severity>,
}

/// Aggregate indicators. The sequence itself is left in rule order.
pub fn aggregate(indicators: &[Indicator]) -> Aggregation {
    Aggregation {
        has_major_indicators: !indicators.is_empty(),
        highest_severity: indicators.iter().map(|i| i.severity).max(),
    }
}
