use std::path::Path;

use anyhow::Context;
use vigil_config::VigilConfig;
use vigil_ingest::{EpiTable, RawRecord, records_from_json};

/// Read literature records from a JSON file (an array of objects or one object).
pub fn read_records(path: &Path) -> anyhow::Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(records_from_json(value))
}

/// Read a case-count CSV file.
pub fn read_epi_table(path: &Path) -> anyhow::Result<EpiTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    vigil_sources::parse_csv(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Resolve the analysis window from flags, falling back to `[general]`.
pub fn window(
    config: &VigilConfig,
    start_year: Option<i32>,
    end_year: Option<i32>,
) -> anyhow::Result<(i32, i32)> {
    let start = start_year.unwrap_or(config.general.start_year);
    let end = end_year.unwrap_or_else(|| config.general.resolved_end_year());
    if start > end {
        anyhow::bail!("start year {start} is after end year {end}");
    }
    Ok((start, end))
}
