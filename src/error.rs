use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a loader run. Every variant is fatal; the
/// pipeline has no partial-success mode.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The remote endpoint was unreachable, returned a bad status, or its
    /// body could not be parsed as CSV.
    #[error("failed to retrieve dataset from {url}: {source}")]
    Retrieval {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The fetched dataset no longer exposes the raw columns the transform
    /// reads. Lists every missing column, not just the first.
    #[error("dataset is missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A row's year/month/day triple does not form a valid calendar date.
    /// Aborts the run rather than dropping the row, since a dropped row would
    /// shift the day index for the rest of its entity.
    #[error("row {row}: {year}-{month}-{day} is not a valid calendar date")]
    MalformedDate {
        row: u64,
        year: String,
        month: String,
        day: String,
    },

    /// The output file or its directory could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
