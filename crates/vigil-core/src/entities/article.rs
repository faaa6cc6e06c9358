use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One literature item in the canonical schema.
///
/// `year` is derived from the raw date (or an integer year field) and is
/// `None` whenever no `19xx`/`20xx` run could be found.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ArticleRecord {
    pub id: String,
    pub title_source: String,
    pub abstract_source: String,
    pub title_display: String,
    pub abstract_display: String,
    pub journal: Option<String>,
    pub publication_date_raw: Option<String>,
    pub year: Option<i32>,
}

impl ArticleRecord {
    /// Source-language title and abstract joined for topic extraction.
    #[must_use]
    pub fn source_text(&self) -> String {
        format!("{} {}", self.title_source, self.abstract_source)
    }

    /// Copy of this record with display-language text replaced.
    #[must_use]
    pub fn with_display(&self, title: String, abstract_text: String) -> Self {
        Self {
            title_display: title,
            abstract_display: abstract_text,
            ..self.clone()
        }
    }

    /// Title to show to a reader: display text, then source text.
    #[must_use]
    pub fn best_title(&self) -> Option<&str> {
        [self.title_display.as_str(), self.title_source.as_str()]
            .into_iter()
            .find(|t| !t.trim().is_empty())
    }
}
