//! # vigil-topics
//!
//! Unsupervised topic extraction over article text.
//!
//! Pipeline:
//! 1. [`preprocess`]: lowercase, strip diacritics, keep `[a-z0-9]` and whitespace
//! 2. [`vectorizer`]: TF-IDF over the `max_features` most frequent non-stop-word terms
//! 3. [`kmeans`]: seeded k-means++ with restarts; top centroid terms per cluster
//! 4. [`topics`]: the end-to-end entry point with explicit skip reasons
//!
//! All computation is synchronous and deterministic for a fixed seed. Callers
//! running inside an async runtime should move it off the reactor
//! (`spawn_blocking` or a rayon pool).

pub mod kmeans;
pub mod preprocess;
pub mod stopwords;
pub mod topics;
pub mod vectorizer;

pub use kmeans::{KMeansParams, cluster, cluster_with};
pub use preprocess::{normalize_text, tokenize};
pub use stopwords::StopWords;
pub use topics::{SkipReason, TopicParams, TopicsOutcome, build_topics};
pub use vectorizer::{FeatureMatrix, vectorize};
