//! # vigil-core
//!
//! Core types and year extraction for Vigil.
//!
//! This crate provides the foundational types shared across all Vigil crates:
//! - Record structs for both input streams (literature articles, epidemiological rows)
//! - Output structs for the derived artifacts (topic clusters, opportunity signals)
//! - Aggregate rows used by reports (region summaries, daily totals)
//! - The best-effort year extractor used by normalization and correlation
//!
//! Every type derives `Serialize`, `Deserialize`, and `JsonSchema` so the
//! report, translation, and storage collaborators can consume them as plain data.

pub mod entities;
pub mod year;

pub use entities::{
    ArticleRecord, DailyTotal, EpiRecord, OpportunitySignal, RegionSummary, TopicCluster,
};
pub use year::{extract_year, is_plausible_year};
