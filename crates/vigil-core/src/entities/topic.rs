use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One topic group produced by a clustering run.
///
/// `rank_index` is only meaningful within the run that produced it.
/// `terms` are ordered most representative first.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TopicCluster {
    pub rank_index: usize,
    pub terms: Vec<String>,
}

impl TopicCluster {
    /// Terms joined for display, e.g. `"insulin, glucose, pump"`.
    #[must_use]
    pub fn label(&self) -> String {
        self.terms.join(", ")
    }
}
