// file: src/ingest/columns.rs
// description: column name to row position mapping with header validation

use crate::error::{LoaderError, Result};
use csv::StringRecord;
use std::collections::HashMap;

/// Maps column names to zero-based positions in a CSV row. Replaces a
/// hard-coded switch: the table comes from configuration, and when the source
/// file has a header row the positions are checked against it before
/// ingestion starts.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    positions: HashMap<String, usize>,
}

impl ColumnMap {
    pub fn new(positions: HashMap<String, usize>) -> Self {
        Self { positions }
    }

    /// Position of `column` in a row, or `None` for an unknown column.
    pub fn resolve(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    /// Every mapped position must carry the mapped name in the file's header
    /// row. Surfaces schema drift as an error instead of silently indexing
    /// the wrong column.
    pub fn validate_header(&self, header: &StringRecord) -> Result<()> {
        for (name, &position) in &self.positions {
            match header.get(position) {
                Some(cell) if cell == name => {}
                Some(cell) => {
                    return Err(LoaderError::Validation(format!(
                        "header mismatch: expected column '{}' at position {}, found '{}'",
                        name, position, cell
                    )));
                }
                None => {
                    return Err(LoaderError::Validation(format!(
                        "header has no position {} for column '{}' ({} columns present)",
                        position,
                        name,
                        header.len()
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self::new(HashMap::from([
            ("Department".to_string(), 1),
            ("Gender".to_string(), 2),
        ]))
    }
}
