//! `PubMed` efetch XML (`PubmedArticleSet`) into raw records.
//!
//! Each `PubmedArticle` becomes one record with the keys `pmid`, `title`,
//! `abstract`, `journal` and `pubdate`. Labelled abstract sections are kept as
//! `Label: text`, one section per line.

use roxmltree::{Document, Node, ParsingOptions};
use serde_json::Value;
use vigil_ingest::RawRecord;

use crate::error::SourceError;

/// Parse an efetch body into one raw record per `PubmedArticle`, in document order.
///
/// # Errors
///
/// Returns [`SourceError::Parse`] if the body is not well-formed XML.
pub fn parse_articles(xml: &str) -> Result<Vec<RawRecord>, SourceError> {
    // efetch bodies carry a DOCTYPE pointing at the NLM DTD.
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)
        .map_err(|error| SourceError::Parse(format!("efetch: {error}")))?;

    Ok(doc
        .descendants()
        .filter(|node| node.has_tag_name("PubmedArticle"))
        .map(article_record)
        .collect())
}

fn article_record(article: Node<'_, '_>) -> RawRecord {
    let citation = child(article, "MedlineCitation");
    let body = citation.and_then(|c| child(c, "Article"));
    let journal = body.and_then(|a| child(a, "Journal"));

    let mut record = RawRecord::new();
    let mut put = |key: &str, value: String| {
        record.insert(key.to_string(), Value::String(value));
    };
    put("pmid", text_at(citation, &["PMID"]));
    put("title", text_at(body, &["ArticleTitle"]));
    put("abstract", abstract_text(body));
    put("journal", text_at(journal, &["Title"]));
    put("pubdate", publication_date(journal));
    record
}

fn abstract_text(article: Option<Node<'_, '_>>) -> String {
    let Some(abstract_node) = article.and_then(|a| child(a, "Abstract")) else {
        return String::new();
    };
    abstract_node
        .children()
        .filter(|n| n.has_tag_name("AbstractText"))
        .filter_map(|section| {
            let text = full_text(section);
            if text.is_empty() {
                return None;
            }
            let label = section
                .attribute("Label")
                .or_else(|| section.attribute("NlmCategory"))
                .filter(|l| !l.trim().is_empty());
            Some(label.map_or_else(|| text.clone(), |label| format!("{}: {text}", label.trim())))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `Year Month Day` when a year is present, otherwise the free-form `MedlineDate`.
fn publication_date(journal: Option<Node<'_, '_>>) -> String {
    let pub_date = journal
        .and_then(|j| child(j, "JournalIssue"))
        .and_then(|i| child(i, "PubDate"));

    let year = text_at(pub_date, &["Year"]);
    if year.is_empty() {
        return text_at(pub_date, &["MedlineDate"]);
    }
    [year, text_at(pub_date, &["Month"]), text_at(pub_date, &["Day"])]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn text_at(node: Option<Node<'_, '_>>, path: &[&str]) -> String {
    let mut current = node;
    for name in path {
        current = current.and_then(|n| child(n, name));
    }
    current.map(full_text).unwrap_or_default()
}

/// Concatenated text of a node and its inline markup (`<i>`, `<sup>`, ...), trimmed.
fn full_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string()
}
