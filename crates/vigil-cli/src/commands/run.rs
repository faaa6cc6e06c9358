use anyhow::Context;
use vigil_config::VigilConfig;
use vigil_ingest::{AliasTable, EpiTable, RawRecord, normalize};
use vigil_sources::SourceClient;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RunArgs;
use crate::commands::shared;
use crate::output::output;
use crate::pipeline::{self, AnalysisInput};
use crate::progress::Progress;

const PUBMED_SOURCE: &str = "PubMed (NCBI E-utilities)";

/// Handle `vgl run`.
pub async fn handle(args: &RunArgs, config: &VigilConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (start_year, end_year) = shared::window(config, args.start_year, args.end_year)?;
    let limit = args.max_results.unwrap_or(config.sources.max_results);
    let client = SourceClient::new(&config.sources).context("failed to build HTTP client")?;

    let progress = Progress::spinner("fetching literature and case counts");
    let (articles, epi) = tokio::join!(
        load_articles(args, &client, start_year, end_year, limit),
        load_epi(args, &client, config),
    );
    let (raw_articles, article_source) = articles.inspect_err(|_| progress.finish_err("failed"))?;
    let (epi_table, epi_source) = epi.inspect_err(|_| progress.finish_err("failed"))?;

    let articles = normalize(&raw_articles, &AliasTable::articles());
    let (epi, epi_skipped) = match epi_table {
        Ok(table) => pipeline::usable_epi(&table),
        Err(reason) => (Vec::new(), Some(reason)),
    };

    let translate = client.translation_enabled() && !args.no_translate;
    let (articles, localization) = if translate {
        progress.set_message("translating titles and abstracts");
        let (articles, report) = pipeline::localize(&client, articles).await;
        (articles, Some(report))
    } else {
        (articles, None)
    };

    if articles.is_empty() && epi.is_empty() {
        tracing::warn!(term = %args.term, "no usable input: zero articles and no case rows");
    }

    progress.set_message("building topics and signals");
    let mut topics = config.topics.clone();
    if let Some(clusters) = args.clusters {
        topics.clusters = clusters;
    }
    let trends = config.trends.clone();
    let input = AnalysisInput {
        term: args.term.clone(),
        start_year,
        end_year,
        articles,
        epi,
        epi_skipped,
        localization,
        sources: vec![article_source, epi_source],
    };
    let mut report = tokio::task::spawn_blocking(move || pipeline::analyze(input, &topics, &trends))
        .await
        .context("analysis task failed")?;

    if translate {
        progress.set_message("translating topic terms");
        let localization = report.localization.get_or_insert_with(Default::default);
        pipeline::localize_topics(&client, &mut report.topics, localization).await;
    }
    progress.finish_clear();

    output(&report, flags.format)
}

/// Literature records from `--articles-file`, or from `PubMed`.
///
/// A failed search is logged and treated as an empty result.
async fn load_articles(
    args: &RunArgs,
    client: &SourceClient,
    start_year: i32,
    end_year: i32,
    limit: usize,
) -> anyhow::Result<(Vec<RawRecord>, String)> {
    if let Some(path) = &args.articles_file {
        return Ok((
            shared::read_records(path)?,
            format!("literature file {}", path.display()),
        ));
    }

    let records = client
        .search_articles(&args.term, start_year, end_year, limit)
        .await
        .unwrap_or_else(|error| {
            tracing::warn!(%error, term = %args.term, "literature search failed; continuing without articles");
            Vec::new()
        });
    Ok((records, PUBMED_SOURCE.to_string()))
}

/// Case counts from `--epi-file`, or from the configured CSV URL.
///
/// A failed download is logged and returned as the reason there is no table.
async fn load_epi(
    args: &RunArgs,
    client: &SourceClient,
    config: &VigilConfig,
) -> anyhow::Result<(Result<EpiTable, String>, String)> {
    if let Some(path) = &args.epi_file {
        return Ok((
            Ok(shared::read_epi_table(path)?),
            format!("case file {}", path.display()),
        ));
    }

    let table = client.fetch_epi_table().await.map_err(|error| {
        tracing::warn!(%error, "case-count download failed; continuing without case counts");
        format!("case-count download failed: {error}")
    });
    Ok((table, format!("case counts {}", config.sources.covid_csv_url)))
}
