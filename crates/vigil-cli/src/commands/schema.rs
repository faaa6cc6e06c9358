use schemars::schema_for;
use serde::Serialize;
use serde_json::Value;
use vigil_core::{ArticleRecord, EpiRecord, OpportunitySignal, TopicCluster};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaTarget};
use crate::output::{Markdown, output};
use crate::report::AnalysisReport;

#[derive(Serialize)]
#[serde(transparent)]
struct SchemaView(Value);

impl Markdown for SchemaView {
    fn to_markdown(&self) -> String {
        let body = serde_json::to_string_pretty(&self.0).unwrap_or_default();
        format!("```json\n{body}\n```")
    }
}

fn schema_of(target: SchemaTarget) -> serde_json::Result<Value> {
    match target {
        SchemaTarget::Article => serde_json::to_value(schema_for!(ArticleRecord)),
        SchemaTarget::Epi => serde_json::to_value(schema_for!(EpiRecord)),
        SchemaTarget::Topic => serde_json::to_value(schema_for!(TopicCluster)),
        SchemaTarget::Signal => serde_json::to_value(schema_for!(OpportunitySignal)),
        SchemaTarget::Report => serde_json::to_value(schema_for!(AnalysisReport)),
    }
}

/// Handle `vgl schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&SchemaView(schema_of(args.target)?), flags.format)
}
