//! Daily case-count CSV source.

use vigil_ingest::EpiTable;

use crate::{SourceClient, error::SourceError, http::check_response};

impl SourceClient {
    /// Download the configured case-count CSV as a raw table.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the download fails or the CSV is malformed.
    pub async fn fetch_epi_table(&self) -> Result<EpiTable, SourceError> {
        let resp = check_response(self.http.get(&self.covid_csv_url).send().await?).await?;
        let table = parse_csv(&resp.text().await?)?;
        tracing::debug!(
            url = %self.covid_csv_url,
            columns = table.columns.len(),
            rows = table.rows.len(),
            "fetched case table"
        );
        Ok(table)
    }
}

/// Parse CSV text with a header row into an [`EpiTable`].
///
/// Cells are trimmed. Rows may be shorter or longer than the header; column
/// lookups on short rows see a missing cell.
///
/// # Errors
///
/// Returns [`SourceError::Csv`] if the text is not valid CSV.
pub fn parse_csv(text: &str) -> Result<EpiTable, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let columns = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(EpiTable { columns, rows })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vigil_config::SourcesConfig;
    use vigil_ingest::{AliasTable, normalize_epi};

    use super::*;

    const NYT_SAMPLE: &str = "\
date,state,fips,cases,deaths
2020-01-21,Washington,53,1,0
2020-01-22,Washington,53,1,0
2020-03-01,New York,36,1,0
";

    #[test]
    fn parses_header_and_rows() {
        let table = parse_csv(NYT_SAMPLE).unwrap();
        assert_eq!(table.columns, ["date", "state", "fips", "cases", "deaths"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[2][1], "New York");
    }

    #[test]
    fn parsed_table_normalizes() {
        let table = parse_csv(NYT_SAMPLE).unwrap();
        let records = normalize_epi(&table, &AliasTable::epi()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].region.as_deref(), Some("Washington"));
        assert_eq!(records[0].cases, Some(1));
    }

    #[test]
    fn ragged_rows_are_kept() {
        let table = parse_csv("data,casos\n2021-05-01\n2021-05-02, 7 ,extra\n").unwrap();
        assert_eq!(table.rows[0], ["2021-05-01"]);
        assert_eq!(table.rows[1], ["2021-05-02", "7", "extra"]);
    }

    #[test]
    fn empty_text_is_an_empty_table() {
        let table = parse_csv("").unwrap();
        assert!(table.columns.is_empty());
        assert!(table.is_empty());
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_fetch_nyt_states() {
        let client = SourceClient::new(&SourcesConfig::default()).unwrap();
        let table = client.fetch_epi_table().await.unwrap();
        assert!(table.columns.iter().any(|c| c == "date"));
        assert!(!table.is_empty());
    }
}
