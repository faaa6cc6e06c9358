//! # vigil-trends
//!
//! Aligns per-year article counts with per-year case totals and flags years
//! where both are high.
//!
//! The rule is a declarative threshold check. It applies no significance
//! testing and no population normalization, so a signal means "both numbers
//! crossed their thresholds", nothing more.

use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use vigil_core::OpportunitySignal;

/// Tunable thresholds for [`correlate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// A year qualifies only if `year >= end_year - lookback`.
    pub lookback: i32,
    /// Inclusive minimum article count.
    pub article_threshold: usize,
    /// Case total must be strictly greater than this.
    pub case_threshold: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            lookback: 3,
            article_threshold: 5,
            case_threshold: 100_000,
        }
    }
}

/// Articles and cases for one year of the shared timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct YearPoint {
    pub year: i32,
    pub article_count: usize,
    /// `None` when the epidemiological series has no known value for the year.
    pub case_total: Option<u64>,
}

/// Count articles per year. Articles without a year are not counted.
#[must_use]
pub fn articles_per_year(article_years: &[Option<i32>]) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for year in article_years.iter().flatten() {
        *counts.entry(*year).or_default() += 1;
    }
    counts
}

/// Merge article counts and case totals over the union of their years, ascending.
#[must_use]
pub fn timeline(article_years: &[Option<i32>], epi_series: &BTreeMap<i32, u64>) -> Vec<YearPoint> {
    let counts = articles_per_year(article_years);
    let years: BTreeSet<i32> = counts.keys().chain(epi_series.keys()).copied().collect();
    years
        .into_iter()
        .map(|year| YearPoint {
            year,
            article_count: counts.get(&year).copied().unwrap_or(0),
            case_total: epi_series.get(&year).copied(),
        })
        .collect()
}

/// Flag years with simultaneous high publication activity and case load.
///
/// A year yields a signal iff `year >= end_year - lookback`,
/// `article_count >= article_threshold` and `case_total > case_threshold`.
/// Signals are in ascending year order.
///
/// ```
/// use std::collections::BTreeMap;
/// use vigil_trends::{Thresholds, correlate};
///
/// let years = [Some(2022); 5];
/// let cases = BTreeMap::from([(2022, 150_000)]);
/// let signals = correlate(&years, &cases, 2023, &Thresholds::default());
/// assert_eq!(signals.len(), 1);
/// assert_eq!(signals[0].year, 2022);
/// ```
#[must_use]
pub fn correlate(
    article_years: &[Option<i32>],
    epi_series: &BTreeMap<i32, u64>,
    end_year: i32,
    thresholds: &Thresholds,
) -> Vec<OpportunitySignal> {
    let earliest = end_year.saturating_sub(thresholds.lookback);
    let signals: Vec<OpportunitySignal> = timeline(article_years, epi_series)
        .into_iter()
        .filter(|point| point.year >= earliest)
        .filter(|point| point.article_count >= thresholds.article_threshold)
        .filter_map(|point| {
            let case_total = point.case_total?;
            (case_total > thresholds.case_threshold).then_some(OpportunitySignal {
                year: point.year,
                article_count: point.article_count,
                case_total,
            })
        })
        .collect();

    tracing::debug!(
        end_year,
        earliest,
        signals = signals.len(),
        "correlated publication and case series"
    );
    signals
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn years(pairs: &[(i32, usize)]) -> Vec<Option<i32>> {
        pairs
            .iter()
            .flat_map(|&(year, n)| std::iter::repeat_n(Some(year), n))
            .collect()
    }

    #[test]
    fn single_qualifying_year() {
        let signals = correlate(
            &years(&[(2022, 5)]),
            &BTreeMap::from([(2022, 150_000)]),
            2023,
            &Thresholds::default(),
        );
        assert_eq!(
            signals,
            vec![OpportunitySignal {
                year: 2022,
                article_count: 5,
                case_total: 150_000
            }]
        );
    }

    #[rstest]
    #[case::case_total_at_threshold(5, 100_000, 2023, 0)]
    #[case::case_total_above_threshold(5, 100_001, 2023, 1)]
    #[case::article_count_below_threshold(4, 500_000, 2023, 0)]
    #[case::year_at_lookback_edge(5, 500_000, 2025, 1)]
    #[case::year_before_lookback(5, 500_000, 2026, 0)]
    fn rule_boundaries(
        #[case] articles: usize,
        #[case] cases: u64,
        #[case] end_year: i32,
        #[case] expected: usize,
    ) {
        let signals = correlate(
            &years(&[(2022, articles)]),
            &BTreeMap::from([(2022, cases)]),
            end_year,
            &Thresholds::default(),
        );
        assert_eq!(signals.len(), expected);
    }

    #[test]
    fn absent_years_are_not_counted() {
        let mut article_years = years(&[(2022, 4)]);
        article_years.extend([None, None, None]);
        let signals = correlate(
            &article_years,
            &BTreeMap::from([(2022, 150_000)]),
            2023,
            &Thresholds::default(),
        );
        assert!(signals.is_empty());
    }

    #[test]
    fn year_without_case_data_never_signals() {
        let signals = correlate(
            &years(&[(2023, 50)]),
            &BTreeMap::from([(2022, 900_000)]),
            2023,
            &Thresholds::default(),
        );
        assert!(signals.is_empty());
    }

    #[test]
    fn signals_are_ascending() {
        let signals = correlate(
            &years(&[(2023, 6), (2021, 9), (2022, 7)]),
            &BTreeMap::from([(2021, 200_000), (2022, 300_000), (2023, 400_000)]),
            2023,
            &Thresholds::default(),
        );
        let ordered: Vec<i32> = signals.iter().map(|s| s.year).collect();
        assert_eq!(ordered, [2021, 2022, 2023]);
    }

    #[test]
    fn custom_thresholds_apply() {
        let thresholds = Thresholds {
            lookback: 0,
            article_threshold: 1,
            case_threshold: 10,
        };
        let signals = correlate(
            &years(&[(2020, 1), (2021, 1)]),
            &BTreeMap::from([(2020, 11), (2021, 11)]),
            2021,
            &thresholds,
        );
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].year, 2021);
    }

    #[test]
    fn timeline_covers_union_of_years() {
        let points = timeline(&years(&[(2019, 2)]), &BTreeMap::from([(2020, 10)]));
        assert_eq!(
            points,
            vec![
                YearPoint {
                    year: 2019,
                    article_count: 2,
                    case_total: None
                },
                YearPoint {
                    year: 2020,
                    article_count: 0,
                    case_total: Some(10)
                },
            ]
        );
    }

    #[test]
    fn empty_inputs_yield_nothing() {
        assert!(correlate(&[], &BTreeMap::new(), 2023, &Thresholds::default()).is_empty());
        assert!(articles_per_year(&[None]).is_empty());
    }
}
