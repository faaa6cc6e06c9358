//! Analysis pipeline shared by the `run`, `topics`, and `trends` commands.
//!
//! Normalized records go through two independent stages, topic extraction
//! and trend correlation, which run in parallel on the rayon pool.

use vigil_config::{TopicsConfig, TrendsConfig};
use vigil_core::{ArticleRecord, EpiRecord};
use vigil_ingest::{
    AliasTable, EpiTable, LocalizationReport, daily_totals, normalize_epi, summarize_regions,
    within_years, yearly_case_totals,
};
use vigil_sources::SourceClient;
use vigil_topics::{KMeansParams, StopWords, TopicParams, build_topics};
use vigil_trends::{Thresholds, correlate, timeline};

use crate::report::{AnalysisReport, TopicsSection};

/// Normalized inputs for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub term: String,
    pub start_year: i32,
    pub end_year: i32,
    pub articles: Vec<ArticleRecord>,
    pub epi: Vec<EpiRecord>,
    /// Why the case table could not be used, if it could not.
    pub epi_skipped: Option<String>,
    pub localization: Option<LocalizationReport>,
    pub sources: Vec<String>,
}

pub fn topic_params(config: &TopicsConfig) -> TopicParams {
    TopicParams {
        clusters: config.clusters,
        max_features: config.max_features,
        kmeans: KMeansParams {
            seed: config.seed,
            restarts: config.restarts,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
            top_terms: config.top_terms,
        },
    }
}

/// Normalize a case table for `vgl run`, which degrades instead of failing.
///
/// Returns the records and, when the table is unusable, the reason.
pub fn usable_epi(table: &EpiTable) -> (Vec<EpiRecord>, Option<String>) {
    if table.columns.is_empty() {
        return (Vec::new(), Some("case table is empty".to_string()));
    }
    match normalize_epi(table, &AliasTable::epi()) {
        Ok(records) => (records, None),
        Err(error) => {
            tracing::warn!(%error, "case table unusable; continuing without case counts");
            (Vec::new(), Some(error.to_string()))
        }
    }
}

pub const fn thresholds(config: &TrendsConfig) -> Thresholds {
    Thresholds {
        lookback: config.lookback,
        article_threshold: config.article_threshold,
        case_threshold: config.case_threshold,
    }
}

/// Source-language text used for clustering, one document per article.
pub fn documents(articles: &[ArticleRecord]) -> Vec<String> {
    articles.iter().map(ArticleRecord::source_text).collect()
}

pub fn article_years(articles: &[ArticleRecord]) -> Vec<Option<i32>> {
    articles.iter().map(|a| a.year).collect()
}

/// Run topic extraction and trend correlation over `input`.
///
/// CPU-bound; call from a blocking context.
pub fn analyze(input: AnalysisInput, topics: &TopicsConfig, trends: &TrendsConfig) -> AnalysisReport {
    let window = within_years(&input.epi, input.start_year, input.end_year);
    let docs = documents(&input.articles);
    let years = article_years(&input.articles);
    let yearly = yearly_case_totals(&window);
    let params = topic_params(topics);
    let limits = thresholds(trends);

    let (outcome, (signals, points)) = rayon::join(
        || build_topics(&docs, &params, &StopWords::bilingual()),
        || {
            (
                correlate(&years, &yearly, input.end_year, &limits),
                timeline(&years, &yearly),
            )
        },
    );

    tracing::info!(
        articles = input.articles.len(),
        epi_rows = window.len(),
        clusters = outcome.clusters().len(),
        signals = signals.len(),
        "analysis complete"
    );

    AnalysisReport {
        term: input.term,
        start_year: input.start_year,
        end_year: input.end_year,
        generated_at: chrono::Utc::now(),
        localization: input.localization,
        epi_rows: window.len(),
        epi_skipped: input.epi_skipped,
        regions: summarize_regions(&window),
        daily: daily_totals(&window),
        timeline: points,
        topics: TopicsSection::from(&outcome),
        signals,
        sources: input.sources,
        articles: input.articles,
    }
}

/// Fill display-language fields through the translation endpoint.
///
/// Fields that fail to translate keep their source text and are counted as
/// unavailable in the returned report.
pub async fn localize(
    client: &SourceClient,
    articles: Vec<ArticleRecord>,
) -> (Vec<ArticleRecord>, LocalizationReport) {
    let mut report = LocalizationReport::default();
    let mut localized = Vec::with_capacity(articles.len());
    for article in &articles {
        let title = client.translation(&article.title_source).await;
        let abstract_text = client.translation(&article.abstract_source).await;
        localized.push(report.apply(article, title, abstract_text));
    }
    if report.unavailable > 0 {
        tracing::warn!(
            translated = report.translated,
            unavailable = report.unavailable,
            "some fields could not be translated; source text kept"
        );
    }
    (localized, report)
}

/// Translate each topic term into `topics.display_terms`.
///
/// Source terms stay in `topics.clusters`. A term that fails to translate is
/// shown as-is and counted as unavailable in `report`.
pub async fn localize_topics(
    client: &SourceClient,
    topics: &mut TopicsSection,
    report: &mut LocalizationReport,
) {
    if topics.clusters.is_empty() {
        return;
    }
    let mut display = Vec::with_capacity(topics.clusters.len());
    for cluster in &topics.clusters {
        let mut terms = Vec::with_capacity(cluster.terms.len());
        for term in &cluster.terms {
            let text = match client.translation(term).await {
                Some(outcome) => {
                    report.record(&outcome);
                    outcome.into_text()
                }
                None => term.clone(),
            };
            terms.push(text);
        }
        display.push(terms);
    }
    topics.display_terms = Some(display);
}
