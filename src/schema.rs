//! The column contract between the ECDC feed and the output the simulation
//! harness reads. Renames are an explicit mapping rather than ad-hoc string
//! lookups so an upstream schema change fails loudly at the fetch boundary.

use crate::error::LoaderError;
use crate::table::RawTable;

/// Grouping key for the per-entity day index.
pub const ENTITY_COLUMN: &str = "countriesAndTerritories";

/// The feed's pre-formatted date string. Discarded in favor of the date
/// rebuilt from the year/month/day parts.
pub const REPORTED_DATE_COLUMN: &str = "dateRep";

/// Decomposed date parts the canonical `date` is rebuilt from.
pub const DATE_PART_COLUMNS: [&str; 3] = ["year", "month", "day"];

/// Source column → name expected by the downstream parameters file.
pub const RENAMED_COLUMNS: [(&str, &str); 3] = [
    ("cases", "new_positives"),
    ("deaths", "new_death"),
    ("popData2018", "population"),
];

/// Every raw column the transform reads or drops.
pub fn required_raw_columns() -> Vec<&'static str> {
    let mut cols = vec![ENTITY_COLUMN, REPORTED_DATE_COLUMN];
    cols.extend(DATE_PART_COLUMNS);
    cols.extend(RENAMED_COLUMNS.iter().map(|(src, _)| *src));
    cols
}

/// Fail with a `Schema` error naming every required column the fetched
/// dataset no longer carries.
pub fn ensure_required_columns(table: &RawTable) -> Result<(), LoaderError> {
    let missing: Vec<String> = required_raw_columns()
        .into_iter()
        .filter(|c| table.column_index(c).is_none())
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoaderError::Schema { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_header_passes() {
        let table = RawTable {
            headers: [
                "dateRep",
                "day",
                "month",
                "year",
                "cases",
                "deaths",
                "countriesAndTerritories",
                "geoId",
                "popData2018",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            rows: vec![],
        };
        assert!(ensure_required_columns(&table).is_ok());
    }

    #[test]
    fn test_missing_columns_are_all_reported() {
        let table = RawTable {
            headers: vec!["dateRep".into(), "year".into(), "month".into(), "day".into()],
            rows: vec![],
        };
        let err = ensure_required_columns(&table).unwrap_err();
        match err {
            LoaderError::Schema { missing } => {
                assert_eq!(
                    missing,
                    vec!["countriesAndTerritories", "cases", "deaths", "popData2018"]
                );
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }
}
