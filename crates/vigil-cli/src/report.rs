//! Report payloads and their Markdown views.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Serialize;
use vigil_core::{ArticleRecord, DailyTotal, OpportunitySignal, RegionSummary, TopicCluster};
use vigil_ingest::LocalizationReport;
use vigil_topics::TopicsOutcome;
use vigil_trends::YearPoint;

use crate::output::{Markdown, bullets};

/// Rows shown in the article and region samples.
const SAMPLE_SIZE: usize = 10;

/// Full output of `vgl run`.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct AnalysisReport {
    pub term: String,
    pub start_year: i32,
    pub end_year: i32,
    pub generated_at: DateTime<Utc>,
    pub articles: Vec<ArticleRecord>,
    /// Translation outcome counts; absent when translation was not attempted.
    pub localization: Option<LocalizationReport>,
    /// Case rows whose date falls inside the window.
    pub epi_rows: usize,
    /// Why case data could not be used at all; absent when it loaded, even if
    /// no row fell inside the window.
    pub epi_skipped: Option<String>,
    pub regions: Vec<RegionSummary>,
    pub daily: Vec<DailyTotal>,
    pub timeline: Vec<YearPoint>,
    pub topics: TopicsSection,
    pub signals: Vec<OpportunitySignal>,
    pub sources: Vec<String>,
}

/// Topic clusters, or why there are none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct TopicsSection {
    /// Clusters with their source-language terms.
    pub clusters: Vec<TopicCluster>,
    /// Display-language terms, parallel to `clusters`; absent when
    /// translation was not attempted.
    pub display_terms: Option<Vec<Vec<String>>>,
    pub skipped: Option<String>,
}

impl From<&TopicsOutcome> for TopicsSection {
    fn from(outcome: &TopicsOutcome) -> Self {
        Self {
            clusters: outcome.clusters().to_vec(),
            display_terms: None,
            skipped: outcome.skip_reason().map(|reason| reason.to_string()),
        }
    }
}

impl TopicsSection {
    /// Terms to show for cluster `index`: display terms when present.
    fn label(&self, index: usize) -> String {
        self.display_terms
            .as_ref()
            .and_then(|terms| terms.get(index))
            .map_or_else(|| self.clusters[index].label(), |terms| terms.join(", "))
    }

    fn markdown(&self) -> String {
        if let Some(reason) = &self.skipped {
            return format!("_Topics skipped: {reason}._");
        }
        bullets(
            self.clusters
                .iter()
                .enumerate()
                .map(|(i, c)| format!("Topic {}: {}", c.rank_index + 1, self.label(i))),
            "No topics.",
        )
    }
}

/// Output of `vgl topics`.
#[derive(Debug, Clone, Serialize)]
pub struct TopicsView {
    pub documents: usize,
    pub topics: TopicsSection,
}

/// Output of `vgl trends`.
#[derive(Debug, Clone, Serialize)]
pub struct TrendsView {
    pub start_year: i32,
    pub end_year: i32,
    pub signals: Vec<OpportunitySignal>,
    pub timeline: Vec<YearPoint>,
    pub regions: Vec<RegionSummary>,
}

fn count(value: Option<u64>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

fn region_line(summary: &RegionSummary) -> String {
    format!(
        "{}: cases={}, deaths={}",
        summary.region,
        count(summary.cases),
        count(summary.deaths)
    )
}

fn article_line(article: &ArticleRecord) -> String {
    let year = article
        .year
        .map_or_else(|| "n.d.".to_string(), |y| y.to_string());
    format!("{} ({year})", article.best_title().unwrap_or("(untitled)"))
}

fn signal_lines(signals: &[OpportunitySignal]) -> String {
    bullets(
        signals.iter().map(OpportunitySignal::describe),
        "No year met every threshold.",
    )
}

impl Markdown for AnalysisReport {
    fn to_markdown(&self) -> String {
        let mut sections = vec![format!(
            "# Vigil report\n\n\
             **Term:** {}\n\
             **Period:** {}-{}\n\
             **Articles retrieved:** {}\n\
             **Case rows in period:** {}",
            self.term,
            self.start_year,
            self.end_year,
            self.articles.len(),
            self.epi_rows
        )];

        if let Some(reason) = &self.epi_skipped {
            sections.push(format!("**Case data:** unavailable ({reason})"));
        }

        if let Some(localization) = &self.localization {
            sections.push(format!(
                "**Translated fields:** {} (unavailable: {})",
                localization.translated, localization.unavailable
            ));
        }

        if !self.articles.is_empty() {
            sections.push(format!(
                "## Articles (sample)\n\n{}",
                bullets(
                    self.articles.iter().take(SAMPLE_SIZE).map(article_line),
                    ""
                )
            ));
        }

        if !self.regions.is_empty() {
            sections.push(format!(
                "## Regions (sample)\n\n{}",
                bullets(self.regions.iter().take(SAMPLE_SIZE).map(region_line), "")
            ));
        }

        sections.push(format!("## Topics\n\n{}", self.topics.markdown()));
        sections.push(format!(
            "## Opportunities (heuristic)\n\n{}",
            signal_lines(&self.signals)
        ));
        sections.push(format!(
            "---\n**Sources:** {}. Generated {}.",
            self.sources.join("; "),
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        sections.join("\n\n")
    }
}

impl Markdown for TopicsView {
    fn to_markdown(&self) -> String {
        format!(
            "## Topics\n\n**Documents:** {}\n\n{}",
            self.documents,
            self.topics.markdown()
        )
    }
}

impl Markdown for TrendsView {
    fn to_markdown(&self) -> String {
        let timeline = self
            .timeline
            .iter()
            .map(|p| {
                format!(
                    "| {} | {} | {} |",
                    p.year,
                    p.article_count,
                    count(p.case_total)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let mut sections = vec![
            format!(
                "## Opportunities (heuristic), {}-{}\n\n{}",
                self.start_year,
                self.end_year,
                signal_lines(&self.signals)
            ),
            format!("## Timeline\n\n| Year | Articles | Cases |\n|---|---|---|\n{timeline}"),
        ];
        if !self.regions.is_empty() {
            sections.push(format!(
                "## Regions (sample)\n\n{}",
                bullets(self.regions.iter().take(SAMPLE_SIZE).map(region_line), "")
            ));
        }
        sections.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vigil_topics::SkipReason;

    use super::*;

    fn report() -> AnalysisReport {
        AnalysisReport {
            term: "diabetes".into(),
            start_year: 2020,
            end_year: 2023,
            generated_at: DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
                .unwrap()
                .with_timezone(&Utc),
            articles: vec![
                ArticleRecord {
                    title_display: "Insulina em adolescentes".into(),
                    year: Some(2022),
                    ..ArticleRecord::default()
                },
                ArticleRecord::default(),
            ],
            localization: None,
            epi_rows: 3,
            epi_skipped: None,
            regions: vec![RegionSummary {
                region: "Washington".into(),
                cases: Some(150_000),
                deaths: None,
            }],
            daily: Vec::new(),
            timeline: Vec::new(),
            topics: TopicsSection {
                clusters: vec![TopicCluster {
                    rank_index: 0,
                    terms: vec!["insulin".into(), "glucose".into()],
                }],
                display_terms: None,
                skipped: None,
            },
            signals: vec![OpportunitySignal {
                year: 2022,
                article_count: 5,
                case_total: 150_000,
            }],
            sources: vec!["PubMed (NCBI E-utilities)".into()],
        }
    }

    #[test]
    fn markdown_has_every_section_in_order() {
        let md = report().to_markdown();
        let positions: Vec<usize> = [
            "# Vigil report",
            "## Articles (sample)",
            "## Regions (sample)",
            "## Topics",
            "## Opportunities (heuristic)",
            "**Sources:**",
        ]
        .iter()
        .map(|heading| md.find(heading).unwrap_or_else(|| panic!("missing {heading}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn markdown_lines_render_values() {
        let md = report().to_markdown();
        assert!(md.contains("- Insulina em adolescentes (2022)"));
        assert!(md.contains("- (untitled) (n.d.)"));
        assert!(md.contains("- Washington: cases=150000, deaths=unknown"));
        assert!(md.contains("- Topic 1: insulin, glucose"));
        assert!(md.contains("Year 2022"));
        assert!(md.contains("Generated 2024-01-02 03:04 UTC"));
    }

    #[test]
    fn empty_sections_are_omitted_or_explained() {
        let mut report = report();
        report.articles.clear();
        report.regions.clear();
        report.signals.clear();
        report.topics = TopicsSection::from(&TopicsOutcome::Skipped(SkipReason::EmptyCorpus));

        let md = report.to_markdown();
        assert!(!md.contains("## Articles"));
        assert!(!md.contains("## Regions"));
        assert!(md.contains("_Topics skipped: no documents to cluster._"));
        assert!(md.contains("_No year met every threshold._"));
    }

    #[test]
    fn display_terms_replace_source_terms_in_markdown() {
        let mut report = report();
        report.topics.display_terms = Some(vec![vec!["insulina".into(), "glicose".into()]]);
        let md = report.to_markdown();
        assert!(md.contains("- Topic 1: insulina, glicose"));
        assert_eq!(report.topics.clusters[0].terms, ["insulin", "glucose"]);
    }

    #[test]
    fn unusable_case_data_is_explained_in_header() {
        let mut report = report();
        report.epi_rows = 0;
        report.regions.clear();
        report.epi_skipped = Some("no date column found".into());
        let md = report.to_markdown();
        let header_end = md.find("## Articles").unwrap();
        assert!(md[..header_end].contains("**Case data:** unavailable (no date column found)"));
        assert!(!self::report().to_markdown().contains("**Case data:**"));
    }

    #[test]
    fn topics_section_from_outcome() {
        let section = TopicsSection::from(&TopicsOutcome::Skipped(SkipReason::TooFewDocuments {
            documents: 1,
        }));
        assert_eq!(section.clusters, Vec::new());
        assert_eq!(section.display_terms, None);
        assert_eq!(
            section.skipped.as_deref(),
            Some("1 document(s); at least 2 are needed")
        );
    }

    #[test]
    fn report_json_matches_its_schema() {
        let schema = serde_json::to_value(schemars::schema_for!(AnalysisReport)).unwrap();
        let instance = serde_json::to_value(report()).unwrap();
        assert!(jsonschema::is_valid(&schema, &instance));
    }

    #[test]
    fn trends_view_renders_table() {
        let view = TrendsView {
            start_year: 2020,
            end_year: 2023,
            signals: Vec::new(),
            timeline: vec![YearPoint {
                year: 2021,
                article_count: 2,
                case_total: None,
            }],
            regions: Vec::new(),
        };
        let md = view.to_markdown();
        assert!(md.contains("| 2021 | 2 | unknown |"));
        assert!(!md.contains("## Regions"));
    }
}
