use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::LoaderError;
use crate::schema::{DATE_PART_COLUMNS, ENTITY_COLUMN, REPORTED_DATE_COLUMN, RENAMED_COLUMNS};
use crate::table::{RawTable, Row};

/// Pure transform from the raw feed to the canonical output table. No I/O.
///
/// Rebuilds `date` from the decomposed parts, sorts by entity then date,
/// derives the per-entity elapsed `day`, and applies the renames. Any invalid
/// year/month/day triple aborts the whole run.
pub fn transform(mut table: RawTable) -> Result<RawTable, LoaderError> {
    // 1) rebuild `date`; keep the parsed values for sorting and the day index
    let dates = rebuild_dates(&table)?;
    table.push_column(
        "date",
        dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect(),
    );
    let mut dropped: Vec<&str> = vec![REPORTED_DATE_COLUMN];
    dropped.extend(DATE_PART_COLUMNS);
    table.drop_columns(&dropped);

    // 2) stable sort by entity then date; ties keep their input order
    let entity_idx = table.require_column(ENTITY_COLUMN)?;
    let mut paired: Vec<(Row, NaiveDate)> = table.rows.drain(..).zip(dates).collect();
    paired.sort_by(|(a, da), (b, db)| {
        a.fields[entity_idx]
            .cmp(&b.fields[entity_idx])
            .then(da.cmp(db))
    });

    // 3) days since each entity's first observation, two passes
    let mut baselines: HashMap<String, NaiveDate> = HashMap::new();
    for (row, date) in &paired {
        baselines
            .entry(row.fields[entity_idx].clone())
            .and_modify(|min| {
                if date < min {
                    *min = *date;
                }
            })
            .or_insert(*date);
    }
    debug!(entities = baselines.len(), "computed per-entity baselines");

    let days: Vec<String> = paired
        .iter()
        .map(|(row, date)| {
            let min = baselines[&row.fields[entity_idx]];
            (*date - min).num_days().to_string()
        })
        .collect();

    table.rows = paired.into_iter().map(|(row, _)| row).collect();
    table.push_column("day", days);

    // 4) rename to the downstream schema, then drop the raw-named sources
    let mut raw_names = Vec::with_capacity(RENAMED_COLUMNS.len());
    for (src, dst) in RENAMED_COLUMNS {
        let values = table.column_values(src)?;
        table.push_column(dst, values);
        raw_names.push(src);
    }
    table.drop_columns(&raw_names);

    Ok(table)
}

/// Parse every row's year/month/day triple into a calendar date, in row order.
fn rebuild_dates(table: &RawTable) -> Result<Vec<NaiveDate>, LoaderError> {
    let [year_idx, month_idx, day_idx] = {
        let mut idx = [0usize; 3];
        for (slot, name) in idx.iter_mut().zip(DATE_PART_COLUMNS) {
            *slot = table.require_column(name)?;
        }
        idx
    };

    let mut dates = Vec::with_capacity(table.len());
    for row in &table.rows {
        let year = &row.fields[year_idx];
        let month = &row.fields[month_idx];
        let day = &row.fields[day_idx];

        let malformed = || LoaderError::MalformedDate {
            row: row.index,
            year: year.clone(),
            month: month.clone(),
            day: day.clone(),
        };

        let y: i32 = year.trim().parse().map_err(|_| malformed())?;
        let m: u32 = month.trim().parse().map_err(|_| malformed())?;
        let d: u32 = day.trim().parse().map_err(|_| malformed())?;
        dates.push(NaiveDate::from_ymd_opt(y, m, d).ok_or_else(malformed)?);
    }

    Ok(dates)
}
