//! External data source endpoints.

use serde::{Deserialize, Serialize};

fn default_pubmed_base_url() -> String {
    "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".to_string()
}

fn default_covid_csv_url() -> String {
    "https://raw.githubusercontent.com/nytimes/covid-19-data/master/us-states.csv".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_results() -> usize {
    50
}

fn default_user_agent() -> String {
    concat!("vigil/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_translate_target() -> String {
    "pt".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcesConfig {
    /// NCBI E-utilities base URL (no trailing slash).
    #[serde(default = "default_pubmed_base_url")]
    pub pubmed_base_url: String,

    /// CSV with daily cumulative counts per region.
    #[serde(default = "default_covid_csv_url")]
    pub covid_csv_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default article limit for literature searches.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// LibreTranslate-compatible endpoint. Empty disables translation.
    #[serde(default)]
    pub translate_url: String,

    /// Target language code for display text.
    #[serde(default = "default_translate_target")]
    pub translate_target: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            pubmed_base_url: default_pubmed_base_url(),
            covid_csv_url: default_covid_csv_url(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            user_agent: default_user_agent(),
            translate_url: String::new(),
            translate_target: default_translate_target(),
        }
    }
}

impl SourcesConfig {
    /// Whether a translation endpoint is configured.
    #[must_use]
    pub fn translation_enabled(&self) -> bool {
        !self.translate_url.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_sources() {
        let config = SourcesConfig::default();
        assert!(config.pubmed_base_url.starts_with("https://eutils.ncbi.nlm.nih.gov"));
        assert!(config.covid_csv_url.ends_with("us-states.csv"));
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("vigil/"));
    }

    #[test]
    fn blank_translate_url_disables_translation() {
        let config = SourcesConfig {
            translate_url: "   ".into(),
            ..SourcesConfig::default()
        };
        assert!(!config.translation_enabled());
    }
}
