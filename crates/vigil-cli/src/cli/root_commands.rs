use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Fetch (or load) articles and case counts, then build the full report.
    Run(RunArgs),
    /// Extract topics from a file of literature records.
    Topics(TopicsArgs),
    /// Correlate a file of literature records with a case-count CSV.
    Trends(TrendsArgs),
    /// Print the JSON Schema of a data contract.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// Literature search term.
    #[arg(long)]
    pub term: String,

    /// First year of the analysis window (default: general.start_year).
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Last year of the analysis window (default: general.end_year or the current year).
    #[arg(long)]
    pub end_year: Option<i32>,

    /// Maximum articles to fetch (default: sources.max_results).
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Requested topic clusters (default: topics.clusters).
    #[arg(long)]
    pub clusters: Option<usize>,

    /// Read literature records from a JSON file instead of `PubMed`.
    #[arg(long)]
    pub articles_file: Option<PathBuf>,

    /// Read case counts from a CSV file instead of sources.covid_csv_url.
    #[arg(long)]
    pub epi_file: Option<PathBuf>,

    /// Skip translation even when sources.translate_url is set.
    #[arg(long)]
    pub no_translate: bool,
}

#[derive(Clone, Debug, Args)]
pub struct TopicsArgs {
    /// JSON file with an array of literature records.
    #[arg(long)]
    pub input: PathBuf,

    /// Requested topic clusters (default: topics.clusters).
    #[arg(long)]
    pub clusters: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct TrendsArgs {
    /// JSON file with an array of literature records.
    #[arg(long)]
    pub articles: PathBuf,

    /// CSV file with daily case counts.
    #[arg(long)]
    pub epi: PathBuf,

    #[arg(long)]
    pub start_year: Option<i32>,

    #[arg(long)]
    pub end_year: Option<i32>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Contract to describe.
    #[arg(value_enum)]
    pub target: SchemaTarget,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaTarget {
    Article,
    Epi,
    Topic,
    Signal,
    Report,
}
