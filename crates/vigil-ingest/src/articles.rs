//! Literature record normalization.
//!
//! Raw records arrive as JSON objects whose field names depend on the API and
//! on which stage of the pipeline produced them. Each canonical field is
//! resolved through an [`AliasTable`]; anything that does not have the expected
//! shape degrades to an empty or absent value for that field only.

use serde_json::{Map, Value};
use vigil_core::{ArticleRecord, extract_year, is_plausible_year};

use crate::aliases::{AliasTable, ArticleField};

/// A loosely-typed literature record as delivered by the search collaborator.
pub type RawRecord = Map<String, Value>;

/// Normalize raw records into [`ArticleRecord`]s.
///
/// Output order and length match the input. Display text falls back to the
/// source text when no display-language field is present.
#[must_use]
pub fn normalize(raw_records: &[RawRecord], aliases: &AliasTable<ArticleField>) -> Vec<ArticleRecord> {
    let records: Vec<ArticleRecord> = raw_records
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_one(index, raw, aliases))
        .collect();

    let with_year = records.iter().filter(|r| r.year.is_some()).count();
    tracing::debug!(records = records.len(), with_year, "normalized article records");
    records
}

/// Split a JSON document into raw records.
///
/// Accepts an array of objects or a single object. Array elements that are not
/// objects become empty records so that record positions are preserved.
#[must_use]
pub fn records_from_json(value: Value) -> Vec<RawRecord> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => map,
                other => {
                    tracing::debug!(kind = json_kind(&other), "non-object article entry");
                    Map::new()
                }
            })
            .collect(),
        Value::Object(map) => vec![map],
        other => {
            tracing::debug!(kind = json_kind(&other), "article payload is not an array");
            Vec::new()
        }
    }
}

fn normalize_one(index: usize, raw: &RawRecord, aliases: &AliasTable<ArticleField>) -> ArticleRecord {
    let text = |field: ArticleField| {
        aliases
            .resolve(raw, field)
            .map(|value| text_value(index, field, value))
    };

    let title_source = text(ArticleField::TitleSource).unwrap_or_default();
    let abstract_source = text(ArticleField::AbstractSource).unwrap_or_default();
    let title_display = text(ArticleField::TitleDisplay)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| title_source.clone());
    let abstract_display = text(ArticleField::AbstractDisplay)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| abstract_source.clone());

    let publication_date_raw = aliases
        .resolve(raw, ArticleField::PublicationDate)
        .and_then(optional_text);
    let year = aliases
        .resolve(raw, ArticleField::Year)
        .and_then(year_value)
        .or_else(|| publication_date_raw.as_deref().and_then(extract_year));

    ArticleRecord {
        id: aliases
            .resolve(raw, ArticleField::Id)
            .map(identifier)
            .unwrap_or_default(),
        title_source,
        abstract_source,
        title_display,
        abstract_display,
        journal: aliases
            .resolve(raw, ArticleField::Journal)
            .and_then(optional_text),
        publication_date_raw,
        year,
    }
}

fn text_value(index: usize, field: ArticleField, value: &Value) -> String {
    if let Some(s) = value.as_str() {
        s.trim().to_string()
    } else {
        tracing::debug!(index, ?field, kind = json_kind(value), "non-string text field");
        String::new()
    }
}

fn optional_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn identifier(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// An explicit year field: integers are taken as-is when plausible, strings are
/// scanned like dates. Anything else defers to the date field.
fn year_value(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0)
                    .map(|f| f as i64)
            })
            .filter(|y| is_plausible_year(*y))
            .and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => extract_year(s),
        _ => None,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
