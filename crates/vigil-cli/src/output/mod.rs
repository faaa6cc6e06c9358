use serde::Serialize;

use crate::cli::OutputFormat;

/// Human-readable Markdown rendering of a command result.
pub trait Markdown {
    fn to_markdown(&self) -> String;
}

/// Render a command result to a string in the requested format.
pub fn render<T: Serialize + Markdown>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Markdown => Ok(value.to_markdown()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a command result in the requested format.
pub fn output<T: Serialize + Markdown>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// A Markdown bullet list, or `empty` in italics when there are no items.
pub fn bullets<I: IntoIterator<Item = String>>(items: I, empty: &str) -> String {
    let lines: Vec<String> = items.into_iter().map(|item| format!("- {item}")).collect();
    if lines.is_empty() {
        format!("_{empty}_")
    } else {
        lines.join("\n")
    }
}
