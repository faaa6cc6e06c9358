//! Alias tables mapping source-specific field names onto canonical fields.
//!
//! Each canonical field owns an ordered list of candidate names. Resolution
//! tries them in order and takes the first one present, so the mapping is a
//! piece of data that can be inspected and tested rather than a chain of
//! ad hoc lookups.

use serde_json::{Map, Value};

/// Canonical fields of an [`ArticleRecord`](vigil_core::ArticleRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticleField {
    Id,
    TitleSource,
    AbstractSource,
    TitleDisplay,
    AbstractDisplay,
    Journal,
    PublicationDate,
    Year,
}

/// Canonical columns of an epidemiological table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpiColumn {
    Date,
    Cases,
    Deaths,
    Region,
}

/// Ordered candidate names per canonical field.
#[derive(Debug, Clone)]
pub struct AliasTable<F> {
    entries: Vec<(F, Vec<String>)>,
}

impl<F> Default for AliasTable<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: Copy + Eq> AliasTable<F> {
    /// Empty table; every field resolves to nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate names for `field`, replacing any previous entry.
    #[must_use]
    pub fn with(mut self, field: F, names: &[&str]) -> Self {
        let names = names.iter().map(|n| (*n).to_string()).collect();
        if let Some(entry) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            entry.1 = names;
        } else {
            self.entries.push((field, names));
        }
        self
    }

    /// Candidate names for `field` in priority order.
    #[must_use]
    pub fn candidates(&self, field: F) -> &[String] {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, names)| names.as_slice())
            .unwrap_or_default()
    }

    /// First non-null value in `record` under one of `field`'s names.
    #[must_use]
    pub fn resolve<'a>(&self, record: &'a Map<String, Value>, field: F) -> Option<&'a Value> {
        self.candidates(field)
            .iter()
            .filter_map(|name| record.get(name))
            .find(|value| !value.is_null())
    }

    /// Index of the first column in `columns` matching one of `field`'s names.
    #[must_use]
    pub fn resolve_column(&self, columns: &[String], field: F) -> Option<usize> {
        self.candidates(field)
            .iter()
            .find_map(|name| columns.iter().position(|c| c == name))
    }
}

impl AliasTable<ArticleField> {
    /// Aliases for PubMed esummary/efetch payloads and previously normalized rows.
    #[must_use]
    pub fn articles() -> Self {
        Self::new()
            .with(ArticleField::Id, &["id", "pmid", "id_pubmed", "uid"])
            .with(
                ArticleField::TitleSource,
                &["title_source", "titulo_en", "title", "titulo"],
            )
            .with(
                ArticleField::AbstractSource,
                &["abstract_source", "resumo_en", "abstract", "resumo"],
            )
            .with(ArticleField::TitleDisplay, &["title_display", "titulo"])
            .with(ArticleField::AbstractDisplay, &["abstract_display", "resumo"])
            .with(
                ArticleField::Journal,
                &["journal", "periodico", "revista", "fulljournalname", "source"],
            )
            .with(
                ArticleField::PublicationDate,
                &[
                    "publication_date_raw",
                    "data_publicacao",
                    "pubdate",
                    "epubdate",
                    "sortpubdate",
                ],
            )
            .with(ArticleField::Year, &["year", "ano"])
    }
}

impl AliasTable<EpiColumn> {
    /// Column spellings seen in public case-count datasets.
    #[must_use]
    pub fn epi() -> Self {
        Self::new()
            .with(EpiColumn::Date, &["date", "Date", "data", "reported_date"])
            .with(EpiColumn::Cases, &["cases", "Cases", "casos"])
            .with(EpiColumn::Deaths, &["deaths", "Deaths", "mortes"])
            .with(EpiColumn::Region, &["state", "State", "estado"])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[rstest]
    #[case(json!({"title": "A", "titulo": "B"}), Some("A"))]
    #[case(json!({"titulo": "B"}), Some("B"))]
    #[case(json!({"titulo_en": "EN", "title": "A"}), Some("EN"))]
    #[case(json!({"title": null, "titulo": "B"}), Some("B"))]
    #[case(json!({"heading": "X"}), None)]
    fn title_resolution_follows_priority(#[case] raw: Value, #[case] expected: Option<&str>) {
        let table = AliasTable::articles();
        let raw = record(raw);
        let resolved = table
            .resolve(&raw, ArticleField::TitleSource)
            .and_then(Value::as_str);
        assert_eq!(resolved, expected);
    }

    #[test]
    fn with_replaces_existing_entry() {
        let table = AliasTable::new()
            .with(EpiColumn::Date, &["a"])
            .with(EpiColumn::Date, &["b", "c"]);
        assert_eq!(table.candidates(EpiColumn::Date), ["b", "c"]);
    }

    #[test]
    fn unknown_field_has_no_candidates() {
        let table: AliasTable<EpiColumn> = AliasTable::new();
        assert!(table.candidates(EpiColumn::Region).is_empty());
    }

    #[test]
    fn column_resolution_uses_alias_order_not_column_order() {
        let columns = vec!["data".to_string(), "date".to_string()];
        let table = AliasTable::epi();
        assert_eq!(table.resolve_column(&columns, EpiColumn::Date), Some(1));
    }

    #[test]
    fn missing_column_resolves_to_none() {
        let columns = vec!["fips".to_string()];
        assert_eq!(
            AliasTable::epi().resolve_column(&columns, EpiColumn::Region),
            None
        );
    }
}
