use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A year with simultaneously high publication volume and case load.
///
/// Produced by a threshold rule, not a statistical test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OpportunitySignal {
    pub year: i32,
    pub article_count: usize,
    pub case_total: u64,
}

impl OpportunitySignal {
    /// One-line human readable description for reports.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "Year {}: high publication activity ({} articles) alongside a heavy case load ({} cases).",
            self.year, self.article_count, self.case_total
        )
    }
}
