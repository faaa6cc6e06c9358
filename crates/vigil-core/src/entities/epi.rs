use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One `(date, region)` epidemiological observation.
///
/// `cases` and `deaths` are cumulative-to-date counters within a region.
/// `None` means the source value was missing or unparseable; it is never
/// treated as zero.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EpiRecord {
    pub date: NaiveDate,
    pub region: Option<String>,
    pub cases: Option<u64>,
    pub deaths: Option<u64>,
}

/// Peak cumulative counters for one region inside a date window.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RegionSummary {
    pub region: String,
    pub cases: Option<u64>,
    pub deaths: Option<u64>,
}

/// Counters summed across regions for a single day.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub cases: Option<u64>,
    pub deaths: Option<u64>,
}
