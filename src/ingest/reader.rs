// file: src/ingest/reader.rs
// description: row-by-row CSV ingestion into a named collection
// reference: one document submission per valid row, no batching

use crate::config::SourceConfig;
use crate::engine::SearchEngine;
use crate::error::Result;
use crate::ingest::columns::ColumnMap;
use crate::ingest::progress::IngestProgress;
use csv::ReaderBuilder;
use std::fs::File;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub rows_read: usize,
    pub documents_indexed: usize,
    pub rows_skipped: usize,
}

impl IngestStats {
    pub fn summary(&self) -> String {
        format!(
            "{} rows read, {} documents indexed, {} rows skipped",
            self.rows_read, self.documents_indexed, self.rows_skipped
        )
    }
}

pub struct CsvIngester<'a> {
    engine: &'a dyn SearchEngine,
    source: &'a SourceConfig,
}

impl<'a> CsvIngester<'a> {
    pub fn new(engine: &'a dyn SearchEngine, source: &'a SourceConfig) -> Self {
        Self { engine, source }
    }

    /// Read the configured CSV and submit one `{column: value}` document per
    /// row to `collection`. Rows where the column cannot be resolved or is
    /// past the end of the row are skipped with a warning; a row the CSV
    /// parser rejects, or a failed submission, aborts the rest of the pass.
    pub async fn index_column(&self, collection: &str, column: &str) -> Result<IngestStats> {
        info!(
            "Ingesting column '{}' from {} into {}",
            column,
            self.source.csv_path.display(),
            collection
        );

        let file = File::open(&self.source.csv_path)?;
        // Flexible: rows may carry fewer cells than the mapping expects;
        // those are the per-row skip path, not a parse failure.
        let mut reader = ReaderBuilder::new()
            .has_headers(self.source.has_header)
            .flexible(true)
            .from_reader(file);

        let map = ColumnMap::new(self.source.columns.clone());
        if self.source.has_header {
            let header = reader.headers()?.clone();
            map.validate_header(&header)?;
        }

        let position = map.resolve(column);
        if position.is_none() {
            warn!("Column '{}' is not in the column mapping", column);
        }

        let progress = IngestProgress::new(collection);
        let outcome = self.drive(&mut reader, position, collection, column, &progress).await;
        match &outcome {
            Ok(stats) => progress.finish(stats),
            Err(_) => progress.clear(),
        }

        if let Ok(stats) = &outcome {
            info!("Ingestion complete: {}", stats.summary());
        }
        outcome
    }

    async fn drive(
        &self,
        reader: &mut csv::Reader<File>,
        position: Option<usize>,
        collection: &str,
        column: &str,
        progress: &IngestProgress,
    ) -> Result<IngestStats> {
        let mut stats = IngestStats::default();

        for record in reader.records() {
            let record = record?;
            stats.rows_read += 1;

            let cell = position.and_then(|index| record.get(index));
            match cell {
                Some(value) => {
                    self.engine.index_document(collection, column, value).await?;
                    stats.documents_indexed += 1;
                }
                None => {
                    warn!(
                        "Invalid column position for '{}' at row {} ({} cells)",
                        column,
                        stats.rows_read,
                        record.len()
                    );
                    stats.rows_skipped += 1;
                }
            }

            progress.row(&stats);
        }

        Ok(stats)
    }
}
