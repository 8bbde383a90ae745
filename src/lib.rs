// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod demo;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod utils;

pub use config::{Config, DemoConfig, EngineConfig, ErrorPolicy, SourceConfig};
pub use demo::DemoRunner;
pub use engine::{DeleteOutcome, EsClient, FacetBucket, SearchEngine};
pub use error::{LoaderError, Result};
pub use ingest::{ColumnMap, CsvIngester, IngestStats};
