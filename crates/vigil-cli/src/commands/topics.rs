use vigil_config::VigilConfig;
use vigil_ingest::{AliasTable, normalize};
use vigil_topics::{StopWords, build_topics};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TopicsArgs;
use crate::commands::shared;
use crate::output::output;
use crate::pipeline;
use crate::progress::Progress;
use crate::report::{TopicsSection, TopicsView};

/// Handle `vgl topics`.
pub fn handle(args: &TopicsArgs, config: &VigilConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = shared::read_records(&args.input)?;
    let articles = normalize(&raw, &AliasTable::articles());

    let mut topics = config.topics.clone();
    if let Some(clusters) = args.clusters {
        topics.clusters = clusters;
    }

    let progress = Progress::spinner("clustering");
    let documents = pipeline::documents(&articles);
    let outcome = build_topics(
        &documents,
        &pipeline::topic_params(&topics),
        &StopWords::bilingual(),
    );
    progress.finish_clear();

    output(
        &TopicsView {
            documents: documents.len(),
            topics: TopicsSection::from(&outcome),
        },
        flags.format,
    )
}
