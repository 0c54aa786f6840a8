use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::LoaderError;
use crate::table::RawTable;

/// Destination directory, relative to the working directory.
pub const DATA_DIR: &str = "data";

/// Output filename the simulation harness reads.
pub const OUTPUT_FILE: &str = "ecdc.csv";

fn write_err(path: &Path, source: csv::Error) -> LoaderError {
    LoaderError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Serialize the table to `path`, creating missing parent directories.
/// The header row gets a leading empty cell and each data row is prefixed
/// with its carried row index, matching what downstream consumers expect.
/// An existing file is overwritten wholesale.
pub fn write_table(table: &RawTable, path: &Path) -> Result<(), LoaderError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_err(path, e.into()))?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| write_err(path, e))?;

    let header = std::iter::once("").chain(table.headers.iter().map(String::as_str));
    writer.write_record(header).map_err(|e| write_err(path, e))?;

    for row in &table.rows {
        let index = row.index.to_string();
        let record = std::iter::once(index.as_str()).chain(row.fields.iter().map(String::as_str));
        writer.write_record(record).map_err(|e| write_err(path, e))?;
    }

    writer.flush().map_err(|e| write_err(path, e.into()))?;
    info!(rows = table.len(), path = %path.display(), "saved output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Row;
    use tempfile::tempdir;

    fn sample() -> RawTable {
        RawTable {
            headers: vec!["countriesAndTerritories".into(), "date".into(), "day".into()],
            rows: vec![
                Row {
                    index: 3,
                    fields: vec!["Afghanistan".into(), "2020-03-01".into(), "0".into()],
                },
                Row {
                    index: 1,
                    fields: vec!["Afghanistan".into(), "2020-03-08".into(), "7".into()],
                },
            ],
        }
    }

    #[test]
    fn test_creates_missing_directories_and_writes_all_rows() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join(DATA_DIR).join(OUTPUT_FILE);

        write_table(&sample(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], ",countriesAndTerritories,date,day");
        assert_eq!(lines[1], "3,Afghanistan,2020-03-01,0");
        assert_eq!(lines[2], "1,Afghanistan,2020-03-08,7");
    }

    #[test]
    fn test_rerun_overwrites_existing_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(OUTPUT_FILE);

        let mut table = sample();
        write_table(&table, &path).unwrap();
        table.rows.truncate(1);
        write_table(&table, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_unwritable_destination_is_a_write_error() {
        let tmp = tempdir().unwrap();
        // a directory at the output path makes file creation fail
        let path = tmp.path().join("out.csv");
        fs::create_dir(&path).unwrap();

        let err = write_table(&sample(), &path).unwrap_err();
        assert!(matches!(err, LoaderError::Write { .. }));
    }
}
