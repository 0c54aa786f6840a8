use std::time::Duration;

use reqwest::Client;
use tracing::info;

use crate::error::LoaderError;
use crate::schema;
use crate::table::{RawTable, Row};

/// The ECDC case-distribution feed. No auth, no query parameters.
pub const DATASET_URL: &str = "https://opendata.ecdc.europa.eu/covid19/casedistribution/csv";

/// Single attempt, fail fast; the timeout covers the whole response.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder().timeout(FETCH_TIMEOUT).build()
}

fn retrieval_err(source: impl std::error::Error + Send + Sync + 'static) -> LoaderError {
    LoaderError::Retrieval {
        url: DATASET_URL.to_string(),
        source: Box::new(source),
    }
}

/// Download the feed and parse it into a `RawTable`, verifying the columns
/// the transform depends on are still present.
pub async fn fetch_dataset(client: &Client) -> Result<RawTable, LoaderError> {
    let resp = client
        .get(DATASET_URL)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(retrieval_err)?;
    let body = resp.text().await.map_err(retrieval_err)?;

    let table = parse_csv(&body).map_err(retrieval_err)?;
    schema::ensure_required_columns(&table)?;

    info!(rows = table.len(), "loaded dataset");
    Ok(table)
}

/// Parse comma-delimited text with a header row. Row indices are assigned
/// here, in file order.
pub fn parse_csv(text: &str) -> Result<RawTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        rows.push(Row {
            index: i as u64,
            fields: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_assigns_file_order_indices() {
        let table = parse_csv("a,b\n1,2\n3,4\n").unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].index, 0);
        assert_eq!(table.rows[1].index, 1);
        assert_eq!(table.rows[1].fields, vec!["3", "4"]);
    }

    #[test]
    fn test_parse_csv_rejects_ragged_rows() {
        assert!(parse_csv("a,b\n1,2,3\n").is_err());
    }
}
