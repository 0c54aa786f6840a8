use crate::error::LoaderError;

/// One record of the dataset. `index` is the row's position in the fetched
/// file; it rides along through sorting so the written output keeps the
/// source-order index column downstream consumers expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub index: u64,
    pub fields: Vec<String>,
}

/// The in-memory tabular structure threaded through the pipeline.
/// All cells are kept as strings; only the columns the transform touches are
/// ever interpreted, everything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Column names, from the header row of the fetched CSV.
    pub headers: Vec<String>,
    /// One entry per data row, in the order they currently stand.
    pub rows: Vec<Row>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Like `column_index`, but a missing column is a schema failure.
    pub fn require_column(&self, name: &str) -> Result<usize, LoaderError> {
        self.column_index(name).ok_or_else(|| LoaderError::Schema {
            missing: vec![name.to_string()],
        })
    }

    /// Clone out one column's cells, in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<String>, LoaderError> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(|r| r.fields[idx].clone()).collect())
    }

    /// Append a new column on the right. `values` must have one entry per row.
    pub fn push_column(&mut self, name: &str, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.headers.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.fields.push(value);
        }
    }

    /// Remove the named columns wherever they exist; unknown names are ignored.
    pub fn drop_columns(&mut self, names: &[&str]) {
        let keep: Vec<bool> = self
            .headers
            .iter()
            .map(|h| !names.contains(&h.as_str()))
            .collect();

        let filter = |fields: &mut Vec<String>| {
            let mut i = 0;
            fields.retain(|_| {
                let k = keep[i];
                i += 1;
                k
            });
        };

        filter(&mut self.headers);
        for row in &mut self.rows {
            filter(&mut row.fields);
        }
    }
}
