// file: src/demo/mod.rs
// description: fixed demonstration sequence against the search engine
// reference: provision, ingest, delete, query, facet in order

use crate::config::{Config, ErrorPolicy};
use crate::engine::{DeleteOutcome, SearchEngine};
use crate::error::Result;
use crate::ingest::CsvIngester;
use tracing::{error, info};

/// Runs the fixed sequence: create two collections, count, ingest one column
/// into each, count, delete one identifier, count, three match searches, one
/// facet per collection. Each step returns a `Result`; the configured error
/// policy decides whether a failure stops the sequence or only logs.
pub struct DemoRunner<'a> {
    engine: &'a dyn SearchEngine,
    config: &'a Config,
}

impl<'a> DemoRunner<'a> {
    pub fn new(engine: &'a dyn SearchEngine, config: &'a Config) -> Self {
        Self { engine, config }
    }

    pub async fn run(&self) -> Result<()> {
        let names = self.config.demo.name_collection.as_str();
        let phones = self.config.demo.phone_collection.as_str();

        self.step("create collection", self.engine.create_collection(names).await)?;
        self.step("create collection", self.engine.create_collection(phones).await)?;

        self.print_count(names, "Employee count").await?;

        let ingester = CsvIngester::new(self.engine, &self.config.source);
        if let Some(stats) = self.step(
            "ingest Department",
            ingester.index_column(names, "Department").await,
        )? {
            info!("{}: {}", names, stats.summary());
        }
        if let Some(stats) = self.step(
            "ingest Gender",
            ingester.index_column(phones, "Gender").await,
        )? {
            info!("{}: {}", phones, stats.summary());
        }

        self.print_count(names, "Employee count after indexing").await?;

        let delete_id = self.config.demo.delete_id.as_str();
        if let Some(outcome) = self.step(
            "delete document",
            self.engine.delete_document(names, delete_id).await,
        )? {
            match outcome {
                DeleteOutcome::Deleted => info!("Deleted document {}", delete_id),
                DeleteOutcome::NotFound => {
                    info!("Document {} not present, nothing deleted", delete_id)
                }
            }
        }

        self.print_count(names, "Employee count after deletion").await?;

        let searches = [
            (names, "Department", "IT"),
            (names, "Gender", "Male"),
            (phones, "Department", "IT"),
        ];
        for (collection, field, value) in searches {
            if let Some(hits) = self.step(
                "search",
                self.engine.search_by_field(collection, field, value).await,
            )? {
                println!("Search results for {}={} in {}: {}", field, value, collection, hits);
            }
        }

        let field = self.config.demo.facet_field.as_str();
        for collection in [names, phones] {
            if let Some(buckets) = self.step(
                "facet",
                self.engine.terms_facet(collection, field).await,
            )? {
                println!("{} facets for {}:", field, collection);
                for bucket in &buckets {
                    println!("  {}: {}", bucket.key, bucket.doc_count);
                }
            }
        }

        Ok(())
    }

    async fn print_count(&self, collection: &str, label: &str) -> Result<()> {
        if let Some(count) = self.step(
            "count documents",
            self.engine.document_count(collection).await,
        )? {
            println!("{}: {}", label, count);
        }
        Ok(())
    }

    fn step<T>(&self, what: &str, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                error!("Step '{}' failed: {}", what, e);
                match self.config.demo.on_error {
                    ErrorPolicy::Abort => Err(e),
                    ErrorPolicy::Continue => Ok(None),
                }
            }
        }
    }
}
