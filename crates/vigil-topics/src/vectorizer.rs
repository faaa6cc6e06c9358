//! TF-IDF document vectorization.
//!
//! Term weights use raw counts for term frequency and smoothed inverse
//! document frequency `ln((1 + n) / (1 + df)) + 1`; each row is then
//! L2-normalized. Documents without any surviving token produce a zero row.

use std::collections::{BTreeMap, HashMap};

use crate::preprocess::tokenize;
use crate::stopwords::StopWords;

/// Dense document-term matrix with its column vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    vocabulary: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Column terms in alphabetical order.
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    #[must_use]
    pub fn n_documents(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    #[must_use]
    pub fn term(&self, column: usize) -> Option<&str> {
        self.vocabulary.get(column).map(String::as_str)
    }
}

/// Vectorize `documents`, keeping at most `max_features` terms.
///
/// Terms are ranked by total frequency across the corpus (ties broken
/// alphabetically) before truncation. The row count always equals the input
/// count, so an empty corpus yields an empty matrix.
#[must_use]
pub fn vectorize<S: AsRef<str>>(
    documents: &[S],
    max_features: usize,
    stop_words: &StopWords,
) -> FeatureMatrix {
    let tokenized: Vec<Vec<String>> = documents
        .iter()
        .map(|doc| {
            tokenize(doc.as_ref())
                .into_iter()
                .filter(|t| !stop_words.contains(t))
                .collect()
        })
        .collect();

    let mut total_counts: HashMap<&str, usize> = HashMap::new();
    for tokens in &tokenized {
        for token in tokens {
            *total_counts.entry(token.as_str()).or_default() += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = total_counts.into_iter().collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(max_features);

    let mut vocabulary: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
    vocabulary.sort_unstable();
    let column: HashMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(i, t)| (t.as_str(), i))
        .collect();

    let counts: Vec<BTreeMap<usize, usize>> = tokenized
        .iter()
        .map(|tokens| {
            let mut row = BTreeMap::new();
            for token in tokens {
                if let Some(&col) = column.get(token.as_str()) {
                    *row.entry(col).or_default() += 1;
                }
            }
            row
        })
        .collect();

    let mut document_frequency = vec![0_usize; vocabulary.len()];
    for row in &counts {
        for &col in row.keys() {
            document_frequency[col] += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let n = counts.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let idf: Vec<f64> = document_frequency
        .iter()
        .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
        .collect();

    let rows = counts
        .iter()
        .map(|row| {
            let mut dense = vec![0.0; vocabulary.len()];
            for (&col, &count) in row {
                #[allow(clippy::cast_precision_loss)]
                let tf = count as f64;
                dense[col] = tf * idf[col];
            }
            l2_normalize(&mut dense);
            dense
        })
        .collect();

    tracing::debug!(
        documents = documents.len(),
        features = vocabulary.len(),
        "built tf-idf matrix"
    );

    FeatureMatrix { vocabulary, rows }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for v in row {
            *v /= norm;
        }
    }
}
