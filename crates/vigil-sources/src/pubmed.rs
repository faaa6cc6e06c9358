//! `PubMed` E-utilities client.
//!
//! `esearch` resolves a query to PMIDs and `efetch` returns the full MEDLINE
//! records (title, abstract, journal, publication date) for those ids.
//! `esummary` is kept as a lighter fallback; it carries no abstracts.
//! Either way the records are passed on as raw records and field names are
//! resolved later by the article alias table.

use serde_json::Value;
use vigil_ingest::RawRecord;

use crate::{SourceClient, error::SourceError, http::check_response, medline};

/// Ids per `efetch` or `esummary` request.
const ID_BATCH: usize = 200;

#[derive(serde::Deserialize)]
struct SearchResponse {
    esearchresult: SearchResult,
}

#[derive(serde::Deserialize)]
struct SearchResult {
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

/// The esearch term restricted to a publication-date range.
#[must_use]
pub fn search_term(term: &str, start_year: i32, end_year: i32) -> String {
    format!("{} AND ({start_year}:{end_year}[dp])", term.trim())
}

impl SourceClient {
    /// Find up to `limit` PMIDs for `term` published in `[start_year, end_year]`,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails, the service returns a
    /// non-success status, or the response reports a query error.
    pub async fn search_ids(
        &self,
        term: &str,
        start_year: i32,
        end_year: i32,
        limit: usize,
    ) -> Result<Vec<String>, SourceError> {
        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={limit}&sort={}&retmode=json",
            self.pubmed_base_url,
            urlencoding::encode(&search_term(term, start_year, end_year)),
            urlencoding::encode("pub date"),
        );
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let ids = parse_search(&resp.text().await?)?;
        tracing::debug!(term, start_year, end_year, ids = ids.len(), "pubmed search");
        Ok(ids)
    }

    /// Fetch full MEDLINE records for `ids`, including abstracts.
    ///
    /// An empty id list returns an empty result without a request.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if any batch request fails or is not valid XML.
    pub async fn fetch_articles(&self, ids: &[String]) -> Result<Vec<RawRecord>, SourceError> {
        let mut records = Vec::with_capacity(ids.len());
        for batch in ids.chunks(ID_BATCH) {
            let url = format!(
                "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml",
                self.pubmed_base_url,
                urlencoding::encode(&batch.join(",")),
            );
            let resp = check_response(self.http.get(&url).send().await?).await?;
            records.extend(medline::parse_articles(&resp.text().await?)?);
        }
        tracing::debug!(requested = ids.len(), fetched = records.len(), "pubmed efetch");
        Ok(records)
    }

    /// Fetch document summaries for `ids`, in the order the service lists them.
    ///
    /// An empty id list returns an empty result without a request.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if any batch request fails or cannot be parsed.
    pub async fn summaries(&self, ids: &[String]) -> Result<Vec<RawRecord>, SourceError> {
        let mut records = Vec::with_capacity(ids.len());
        for batch in ids.chunks(ID_BATCH) {
            let url = format!(
                "{}/esummary.fcgi?db=pubmed&id={}&retmode=json",
                self.pubmed_base_url,
                urlencoding::encode(&batch.join(",")),
            );
            let resp = check_response(self.http.get(&url).send().await?).await?;
            let body: Value = serde_json::from_str(&resp.text().await?)?;
            records.extend(parse_summaries(body)?);
        }
        Ok(records)
    }

    /// Search, then fetch full records for the hits.
    ///
    /// If `efetch` fails the hits are fetched through `esummary` instead, so
    /// the records arrive without abstracts rather than not at all.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::search_ids`], and from
    /// [`Self::summaries`] when the fallback also fails.
    pub async fn search_articles(
        &self,
        term: &str,
        start_year: i32,
        end_year: i32,
        limit: usize,
    ) -> Result<Vec<RawRecord>, SourceError> {
        let ids = self.search_ids(term, start_year, end_year, limit).await?;
        match self.fetch_articles(&ids).await {
            Ok(records) => Ok(records),
            Err(error) => {
                tracing::warn!(%error, "efetch failed; falling back to esummary without abstracts");
                self.summaries(&ids).await
            }
        }
    }
}

fn parse_search(body: &str) -> Result<Vec<String>, SourceError> {
    let data: SearchResponse = serde_json::from_str(body)?;
    if let Some(error) = data.esearchresult.error {
        return Err(SourceError::Parse(format!("esearch: {error}")));
    }
    Ok(data.esearchresult.idlist)
}

/// Extract summary objects from an esummary body, ordered by `result.uids`.
fn parse_summaries(mut body: Value) -> Result<Vec<RawRecord>, SourceError> {
    if let Some(error) = body.get("error").and_then(Value::as_str) {
        return Err(SourceError::Parse(format!("esummary: {error}")));
    }
    let Some(Value::Object(mut result)) = body.get_mut("result").map(Value::take) else {
        return Err(SourceError::Parse("esummary: missing `result` object".into()));
    };

    let uids: Vec<String> = result
        .get("uids")
        .and_then(Value::as_array)
        .map(|uids| {
            uids.iter()
                .filter_map(|u| u.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let mut records = Vec::with_capacity(uids.len());
    for uid in uids {
        match result.remove(&uid) {
            Some(Value::Object(mut summary)) => {
                summary
                    .entry("uid")
                    .or_insert_with(|| Value::String(uid.clone()));
                records.push(summary);
            }
            _ => tracing::debug!(%uid, "esummary listed a uid without a summary"),
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vigil_config::SourcesConfig;

    use super::*;

    const SEARCH_FIXTURE: &str = r#"{
        "header": {"type": "esearch", "version": "0.3"},
        "esearchresult": {
            "count": "2",
            "retmax": "2",
            "retstart": "0",
            "idlist": ["38012345", "37999999"],
            "querytranslation": "diabetes AND 2020:2024[dp]"
        }
    }"#;

    const SUMMARY_FIXTURE: &str = r#"{
        "header": {"type": "esummary", "version": "0.3"},
        "result": {
            "uids": ["38012345", "37999999"],
            "37999999": {
                "uid": "37999999",
                "pubdate": "2023 Oct",
                "source": "Lancet",
                "fulljournalname": "Lancet (London, England)",
                "title": "Global burden of type 2 diabetes.",
                "elocationid": "doi: 10.1016/S0140-6736(23)00001-1"
            },
            "38012345": {
                "uid": "38012345",
                "pubdate": "2023 Nov 2",
                "source": "Diabetes Care",
                "fulljournalname": "Diabetes care",
                "title": "Closed-loop insulin delivery in adolescents."
            }
        }
    }"#;

    #[test]
    fn search_term_restricts_dates() {
        assert_eq!(
            search_term(" heart failure ", 2019, 2024),
            "heart failure AND (2019:2024[dp])"
        );
    }

    #[test]
    fn parses_id_list() {
        assert_eq!(parse_search(SEARCH_FIXTURE).unwrap(), ["38012345", "37999999"]);
    }

    #[test]
    fn search_error_is_reported() {
        let body = r#"{"esearchresult": {"ERROR": "Invalid query"}}"#;
        let err = parse_search(body).unwrap_err();
        assert!(err.to_string().contains("Invalid query"));
    }

    #[test]
    fn summaries_follow_uid_order() {
        let records = parse_summaries(serde_json::from_str(SUMMARY_FIXTURE).unwrap()).unwrap();
        let uids: Vec<&str> = records
            .iter()
            .filter_map(|r| r.get("uid").and_then(Value::as_str))
            .collect();
        assert_eq!(uids, ["38012345", "37999999"]);
        assert_eq!(records[1]["fulljournalname"], "Lancet (London, England)");
    }

    #[test]
    fn summary_without_result_is_an_error() {
        assert!(matches!(
            parse_summaries(serde_json::json!({"header": {}})),
            Err(SourceError::Parse(_))
        ));
    }

    #[test]
    fn missing_summary_entries_are_skipped() {
        let body = serde_json::json!({"result": {"uids": ["1", "2"], "2": {"title": "x"}}});
        let records = parse_summaries(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["uid"], "2");
    }

    #[tokio::test]
    async fn empty_id_list_skips_the_request() {
        let config = SourcesConfig {
            pubmed_base_url: "http://127.0.0.1:9".into(),
            ..SourcesConfig::default()
        };
        let client = SourceClient::new(&config).unwrap();
        assert!(client.summaries(&[]).await.unwrap().is_empty());
        assert!(client.fetch_articles(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_search_articles() {
        let client = SourceClient::new(&SourcesConfig::default()).unwrap();
        let records = client
            .search_articles("diabetes", 2020, 2024, 5)
            .await
            .unwrap();
        assert!(!records.is_empty());
        for record in &records {
            println!("{:?} {:?}", record.get("title"), record.get("abstract"));
        }
    }
}
