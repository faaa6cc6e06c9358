//! Epidemiological table normalization and aggregation.
//!
//! Counts in these datasets are cumulative-to-date per region, so per-region
//! summaries take the maximum observed value in a window. Cross-region views
//! (daily and yearly totals) sum the known values. A count that is missing or
//! unparseable stays unknown and never contributes a zero.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use vigil_core::{DailyTotal, EpiRecord, RegionSummary};

use crate::aliases::{AliasTable, EpiColumn};
use crate::error::EpiError;

/// Tabular epidemiological data as delivered by the collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpiTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl EpiTable {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Normalize a table into [`EpiRecord`]s.
///
/// Rows whose date cannot be parsed are dropped. Missing cells and cells that
/// are not non-negative integers become unknown counts.
///
/// # Errors
///
/// Returns [`EpiError::MissingDateColumn`] when no column matches a date alias.
pub fn normalize_epi(
    table: &EpiTable,
    aliases: &AliasTable<EpiColumn>,
) -> Result<Vec<EpiRecord>, EpiError> {
    let date_idx = aliases
        .resolve_column(&table.columns, EpiColumn::Date)
        .ok_or_else(|| EpiError::MissingDateColumn {
            columns: table.columns.clone(),
        })?;
    let cases_idx = aliases.resolve_column(&table.columns, EpiColumn::Cases);
    let deaths_idx = aliases.resolve_column(&table.columns, EpiColumn::Deaths);
    let region_idx = aliases.resolve_column(&table.columns, EpiColumn::Region);

    if region_idx.is_none() {
        tracing::debug!("no region column; records only feed aggregate series");
    }

    let mut dropped = 0usize;
    let records: Vec<EpiRecord> = table
        .rows
        .iter()
        .filter_map(|row| {
            let Some(date) = cell(row, Some(date_idx)).and_then(parse_date) else {
                dropped += 1;
                return None;
            };
            Some(EpiRecord {
                date,
                region: cell(row, region_idx)
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_string),
                cases: cell(row, cases_idx).and_then(parse_count),
                deaths: cell(row, deaths_idx).and_then(parse_count),
            })
        })
        .collect();

    if dropped > 0 {
        tracing::warn!(dropped, kept = records.len(), "dropped epi rows with unparseable dates");
    }
    Ok(records)
}

/// Records whose date falls in the calendar years `start..=end`.
#[must_use]
pub fn within_years(records: &[EpiRecord], start: i32, end: i32) -> Vec<EpiRecord> {
    records
        .iter()
        .filter(|r| (start..=end).contains(&r.date.year()))
        .cloned()
        .collect()
}

/// Peak known counters per region, highest case count first.
///
/// Regions whose case counts are all unknown sort last. Records without a
/// region are not summarized.
#[must_use]
pub fn summarize_regions(records: &[EpiRecord]) -> Vec<RegionSummary> {
    let mut peaks: BTreeMap<&str, (Option<u64>, Option<u64>)> = BTreeMap::new();
    for record in records {
        let Some(region) = record.region.as_deref() else {
            continue;
        };
        let entry = peaks.entry(region).or_default();
        entry.0 = max_known(entry.0, record.cases);
        entry.1 = max_known(entry.1, record.deaths);
    }

    let mut summaries: Vec<RegionSummary> = peaks
        .into_iter()
        .map(|(region, (cases, deaths))| RegionSummary {
            region: region.to_string(),
            cases,
            deaths,
        })
        .collect();
    // BTreeMap iteration already orders by region; a stable sort keeps that as the tie-break.
    summaries.sort_by(|a, b| b.cases.cmp(&a.cases));
    summaries
}

/// Known counters summed across regions for each date, ascending by date.
#[must_use]
pub fn daily_totals(records: &[EpiRecord]) -> Vec<DailyTotal> {
    let mut days: BTreeMap<NaiveDate, (Option<u64>, Option<u64>)> = BTreeMap::new();
    for record in records {
        let entry = days.entry(record.date).or_default();
        entry.0 = add_known(entry.0, record.cases);
        entry.1 = add_known(entry.1, record.deaths);
    }
    days.into_iter()
        .map(|(date, (cases, deaths))| DailyTotal {
            date,
            cases,
            deaths,
        })
        .collect()
}

/// Known case counts summed per calendar year.
///
/// A year whose case values are all unknown is absent rather than zero.
#[must_use]
pub fn yearly_case_totals(records: &[EpiRecord]) -> BTreeMap<i32, u64> {
    let mut years = BTreeMap::new();
    for record in records {
        if let Some(cases) = record.cases {
            let total: &mut u64 = years.entry(record.date.year()).or_default();
            *total = total.saturating_add(cases);
        }
    }
    years
}

fn cell(row: &[String], idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| row.get(i)).map(String::as_str)
}

fn max_known(current: Option<u64>, next: Option<u64>) -> Option<u64> {
    match (current, next) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

fn add_known(current: Option<u64>, next: Option<u64>) -> Option<u64> {
    match next {
        Some(value) => Some(current.unwrap_or(0).saturating_add(value)),
        None => current,
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    // Timestamps such as "2020-03-01T00:00:00" or "2020-03-01 00:00:00" keep only the day.
    let day = match raw.char_indices().nth(10) {
        Some((idx, 'T' | ' ')) => &raw[..idx],
        _ => raw,
    };
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(day, fmt).ok())
}

fn parse_count(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<u64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}
