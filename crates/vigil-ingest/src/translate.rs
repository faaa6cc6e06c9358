//! Display-language translation outcomes.
//!
//! Translation is performed by an external service. Its result is recorded as
//! a [`Translation`] so callers can tell "translated" apart from "service
//! unavailable, original text kept" instead of silently receiving the source text.

use std::fmt::Display;

use vigil_core::ArticleRecord;

/// Outcome of translating one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Translated(String),
    Unavailable { original: String },
}

impl Translation {
    /// Map a translator result into an outcome. Errors and blank output keep the original.
    pub fn from_result<E: Display>(original: &str, result: Result<String, E>) -> Self {
        match result {
            Ok(text) if !text.trim().is_empty() => Self::Translated(text),
            Ok(_) => {
                tracing::debug!("translator returned blank text; keeping original");
                Self::unavailable(original)
            }
            Err(error) => {
                tracing::debug!(%error, "translation unavailable; keeping original");
                Self::unavailable(original)
            }
        }
    }

    #[must_use]
    pub fn unavailable(original: &str) -> Self {
        Self::Unavailable {
            original: original.to_string(),
        }
    }

    /// Text to display: the translation, or the original.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Translated(text) => text,
            Self::Unavailable { original } => original,
        }
    }

    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Translated(text) => text,
            Self::Unavailable { original } => original,
        }
    }

    #[must_use]
    pub const fn is_translated(&self) -> bool {
        matches!(self, Self::Translated(_))
    }
}

/// Counts of translation outcomes across a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, schemars::JsonSchema)]
pub struct LocalizationReport {
    pub translated: usize,
    pub unavailable: usize,
}

impl LocalizationReport {
    pub fn record(&mut self, outcome: &Translation) {
        if outcome.is_translated() {
            self.translated += 1;
        } else {
            self.unavailable += 1;
        }
    }

    /// Build the display-language copy of `record`.
    ///
    /// `None` means there was nothing to translate and the current display
    /// text is kept without being counted.
    pub fn apply(
        &mut self,
        record: &ArticleRecord,
        title: Option<Translation>,
        abstract_text: Option<Translation>,
    ) -> ArticleRecord {
        let mut resolve = |outcome: Option<Translation>, current: &str| match outcome {
            Some(outcome) => {
                self.record(&outcome);
                outcome.into_text()
            }
            None => current.to_string(),
        };
        let title = resolve(title, &record.title_display);
        let abstract_text = resolve(abstract_text, &record.abstract_display);
        record.with_display(title, abstract_text)
    }
}
