//! Opportunity rule thresholds.
//!
//! These are heuristics carried over as configurable defaults, not validated
//! domain thresholds.

use serde::{Deserialize, Serialize};

const fn default_lookback() -> i32 {
    3
}

const fn default_article_threshold() -> usize {
    5
}

const fn default_case_threshold() -> u64 {
    100_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrendsConfig {
    /// Years before the end year that may still produce a signal.
    #[serde(default = "default_lookback")]
    pub lookback: i32,

    /// Minimum articles in a year (inclusive).
    #[serde(default = "default_article_threshold")]
    pub article_threshold: usize,

    /// Case total a year must strictly exceed.
    #[serde(default = "default_case_threshold")]
    pub case_threshold: u64,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            lookback: default_lookback(),
            article_threshold: default_article_threshold(),
            case_threshold: default_case_threshold(),
        }
    }
}
