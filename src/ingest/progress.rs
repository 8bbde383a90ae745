// file: src/ingest/progress.rs
// description: terminal progress reporting for an ingestion pass
// reference: uses indicatif; the row stream length is unknown up front

use crate::ingest::reader::IngestStats;
use indicatif::{ProgressBar, ProgressStyle};

pub struct IngestProgress {
    bar: ProgressBar,
}

impl IngestProgress {
    pub fn new(collection: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("Failed to create spinner template"),
        );
        bar.set_message(format!("Indexing into {}", collection));
        Self { bar }
    }

    pub fn row(&self, stats: &IngestStats) {
        self.bar.set_message(format!(
            "{} rows | {} indexed | {} skipped",
            stats.rows_read, stats.documents_indexed, stats.rows_skipped
        ));
        self.bar.tick();
    }

    pub fn finish(&self, stats: &IngestStats) {
        self.bar.finish_with_message(stats.summary());
    }

    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}
