use anyhow::Context;
use vigil_config::VigilConfig;
use vigil_ingest::{
    AliasTable, normalize, normalize_epi, summarize_regions, within_years, yearly_case_totals,
};
use vigil_trends::{correlate, timeline};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TrendsArgs;
use crate::commands::shared;
use crate::output::output;
use crate::pipeline;
use crate::report::TrendsView;

/// Handle `vgl trends`.
pub fn handle(args: &TrendsArgs, config: &VigilConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (start_year, end_year) = shared::window(config, args.start_year, args.end_year)?;

    let articles = normalize(
        &shared::read_records(&args.articles)?,
        &AliasTable::articles(),
    );
    let table = shared::read_epi_table(&args.epi)?;
    let epi = normalize_epi(&table, &AliasTable::epi())
        .with_context(|| format!("{} cannot be used as a case table", args.epi.display()))?;

    let window = within_years(&epi, start_year, end_year);
    let years = pipeline::article_years(&articles);
    let yearly = yearly_case_totals(&window);

    output(
        &TrendsView {
            start_year,
            end_year,
            signals: correlate(
                &years,
                &yearly,
                end_year,
                &pipeline::thresholds(&config.trends),
            ),
            timeline: timeline(&years, &yearly),
            regions: summarize_regions(&window),
        },
        flags.format,
    )
}
