//! Topic extraction parameters.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_clusters() -> usize {
    5
}

const fn default_max_features() -> usize {
    5000
}

const fn default_seed() -> u64 {
    42
}

const fn default_restarts() -> usize {
    10
}

const fn default_max_iterations() -> usize {
    300
}

const fn default_tolerance() -> f64 {
    1e-4
}

const fn default_top_terms() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TopicsConfig {
    /// Requested number of clusters (clamped to the corpus size at run time).
    #[serde(default = "default_clusters")]
    pub clusters: usize,

    /// Vocabulary cap for the TF-IDF vectorizer.
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Seed for k-means initialization. Fixed so runs are reproducible.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of seeded k-means restarts; the lowest-inertia run wins.
    #[serde(default = "default_restarts")]
    pub restarts: usize,

    /// Lloyd iteration cap per restart.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Convergence threshold on total centroid shift.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Terms reported per cluster.
    #[serde(default = "default_top_terms")]
    pub top_terms: usize,
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            clusters: default_clusters(),
            max_features: default_max_features(),
            seed: default_seed(),
            restarts: default_restarts(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            top_terms: default_top_terms(),
        }
    }
}

impl TopicsConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.clusters == 0 {
            return Err(ConfigError::invalid("topics.clusters", "must be at least 1"));
        }
        if self.max_features == 0 {
            return Err(ConfigError::invalid(
                "topics.max_features",
                "must be at least 1",
            ));
        }
        if self.restarts == 0 {
            return Err(ConfigError::invalid("topics.restarts", "must be at least 1"));
        }
        Ok(())
    }
}
