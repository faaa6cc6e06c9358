//! Record structs for Vigil's inputs and derived artifacts.
//!
//! Records are built once per analysis run and never mutated afterwards.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation at the collaborator boundary.

mod article;
mod epi;
mod signal;
mod topic;

pub use article::ArticleRecord;
pub use epi::{DailyTotal, EpiRecord, RegionSummary};
pub use signal::OpportunitySignal;
pub use topic::TopicCluster;
