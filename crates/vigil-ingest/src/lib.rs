//! # vigil-ingest
//!
//! Normalization of Vigil's two loosely-structured input streams into typed records.
//!
//! - [`aliases`]: declarative alias tables (ordered candidate names per canonical field)
//! - [`articles`]: literature records → [`ArticleRecord`](vigil_core::ArticleRecord)
//! - [`epi`]: epidemiological tables → [`EpiRecord`](vigil_core::EpiRecord), plus
//!   window filtering and cumulative-counter aggregation
//! - [`translate`]: explicit translation outcomes for display-language text
//!
//! Everything here is synchronous and pure. Malformed fields degrade to empty or
//! absent values; only a missing date column is reported as an error.

pub mod aliases;
pub mod articles;
pub mod epi;
pub mod translate;

mod error;

pub use aliases::{AliasTable, ArticleField, EpiColumn};
pub use articles::{RawRecord, normalize, records_from_json};
pub use epi::{
    EpiTable, daily_totals, normalize_epi, summarize_regions, within_years, yearly_case_totals,
};
pub use error::EpiError;
pub use translate::{LocalizationReport, Translation};
