//! # vigil-sources
//!
//! HTTP clients for the external collaborators that feed Vigil:
//! - `PubMed` E-utilities (esearch, then efetch XML with an esummary fallback)
//!   for literature records
//! - a CSV of daily cumulative case counts per region
//! - an optional LibreTranslate-compatible endpoint for display-language text
//!
//! Clients return raw collaborator payloads (`RawRecord`, `EpiTable`); all
//! interpretation happens in `vigil-ingest`.

pub mod covid;
pub mod medline;
pub mod pubmed;
pub mod translate;

mod error;
mod http;

pub use covid::parse_csv;
pub use error::SourceError;

use std::time::Duration;

use vigil_config::SourcesConfig;

/// HTTP client shared by every source.
#[derive(Debug, Clone)]
pub struct SourceClient {
    http: reqwest::Client,
    pubmed_base_url: String,
    covid_csv_url: String,
    translate_url: Option<String>,
    translate_target: String,
}

impl SourceClient {
    /// Build a client from the `[sources]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be built (e.g. TLS backend initialization fails).
    pub fn new(config: &SourcesConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            pubmed_base_url: config.pubmed_base_url.trim_end_matches('/').to_string(),
            covid_csv_url: config.covid_csv_url.clone(),
            translate_url: config
                .translation_enabled()
                .then(|| config.translate_url.trim().trim_end_matches('/').to_string()),
            translate_target: config.translate_target.clone(),
        })
    }

    /// Whether [`SourceClient::translate`] has an endpoint to call.
    #[must_use]
    pub const fn translation_enabled(&self) -> bool {
        self.translate_url.is_some()
    }
}
