//! End-to-end topic extraction.

use serde::Serialize;
use vigil_core::TopicCluster;

use crate::kmeans::{KMeansParams, cluster_with};
use crate::stopwords::StopWords;
use crate::vectorizer::vectorize;

/// Parameters for [`build_topics`].
#[derive(Debug, Clone, PartialEq)]
pub struct TopicParams {
    /// Requested clusters, clamped to the document count.
    pub clusters: usize,
    pub max_features: usize,
    pub kmeans: KMeansParams,
}

impl Default for TopicParams {
    fn default() -> Self {
        Self {
            clusters: 5,
            max_features: 5000,
            kmeans: KMeansParams::default(),
        }
    }
}

/// Why no clusters were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// No documents were supplied.
    EmptyCorpus,
    /// Fewer than two documents, so at most one cluster is possible.
    TooFewDocuments { documents: usize },
    /// Fewer than two clusters were requested.
    TooFewClusters { requested: usize },
    /// Every token was a stop word or too short.
    EmptyVocabulary,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCorpus => f.write_str("no documents to cluster"),
            Self::TooFewDocuments { documents } => {
                write!(f, "{documents} document(s); at least 2 are needed")
            }
            Self::TooFewClusters { requested } => {
                write!(f, "{requested} cluster(s) requested; at least 2 are needed")
            }
            Self::EmptyVocabulary => f.write_str("no usable terms after stop-word removal"),
        }
    }
}

/// Result of a topic extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum TopicsOutcome {
    Clusters(Vec<TopicCluster>),
    Skipped(SkipReason),
}

impl TopicsOutcome {
    /// The clusters, or an empty slice when the run was skipped.
    #[must_use]
    pub fn clusters(&self) -> &[TopicCluster] {
        match self {
            Self::Clusters(clusters) => clusters,
            Self::Skipped(_) => &[],
        }
    }

    #[must_use]
    pub const fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Clusters(_) => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }
}

/// Vectorize `documents` and cluster them.
///
/// Insufficient input is reported as [`TopicsOutcome::Skipped`] rather than
/// an error; an empty cluster list is never returned silently.
#[must_use]
pub fn build_topics<S: AsRef<str>>(
    documents: &[S],
    params: &TopicParams,
    stop_words: &StopWords,
) -> TopicsOutcome {
    let outcome = match documents.len() {
        0 => TopicsOutcome::Skipped(SkipReason::EmptyCorpus),
        1 => TopicsOutcome::Skipped(SkipReason::TooFewDocuments { documents: 1 }),
        _ if params.clusters < 2 => TopicsOutcome::Skipped(SkipReason::TooFewClusters {
            requested: params.clusters,
        }),
        _ => {
            let matrix = vectorize(documents, params.max_features, stop_words);
            if matrix.n_features() == 0 {
                TopicsOutcome::Skipped(SkipReason::EmptyVocabulary)
            } else {
                TopicsOutcome::Clusters(cluster_with(&matrix, params.clusters, &params.kmeans))
            }
        }
    };

    match &outcome {
        TopicsOutcome::Clusters(clusters) => {
            tracing::info!(clusters = clusters.len(), documents = documents.len(), "topics built");
        }
        TopicsOutcome::Skipped(reason) => {
            tracing::warn!(%reason, "topic extraction skipped");
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_corpus_is_skipped() {
        let outcome = build_topics::<&str>(&[], &TopicParams::default(), &StopWords::bilingual());
        assert_eq!(outcome, TopicsOutcome::Skipped(SkipReason::EmptyCorpus));
        assert!(outcome.clusters().is_empty());
    }

    #[test]
    fn single_document_is_skipped() {
        let outcome = build_topics(
            &["Heart failure outcomes"],
            &TopicParams::default(),
            &StopWords::bilingual(),
        );
        assert_eq!(
            outcome.skip_reason(),
            Some(SkipReason::TooFewDocuments { documents: 1 })
        );
    }

    #[test]
    fn stop_word_only_corpus_is_skipped() {
        let outcome = build_topics(
            &["the and of", "o que de"],
            &TopicParams::default(),
            &StopWords::bilingual(),
        );
        assert_eq!(outcome.skip_reason(), Some(SkipReason::EmptyVocabulary));
    }

    #[test]
    fn clusters_are_clamped_to_documents() {
        let outcome = build_topics(
            &["insulin pump", "tumor response", "asthma inhaler"],
            &TopicParams::default(),
            &StopWords::bilingual(),
        );
        assert_eq!(outcome.clusters().len(), 3);
    }

    #[test]
    fn single_cluster_request_is_skipped() {
        let params = TopicParams {
            clusters: 1,
            ..TopicParams::default()
        };
        let outcome = build_topics(&["insulin", "tumor"], &params, &StopWords::bilingual());
        assert_eq!(
            outcome.skip_reason(),
            Some(SkipReason::TooFewClusters { requested: 1 })
        );
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(TopicsOutcome::Skipped(SkipReason::EmptyCorpus)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "skipped", "detail": {"reason": "empty_corpus"}})
        );
    }
}
