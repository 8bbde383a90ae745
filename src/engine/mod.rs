// file: src/engine/mod.rs
// description: search engine operations module exports
// reference: internal module structure

pub mod client;
pub mod response;

#[cfg(test)]
pub(crate) mod fake;

pub use client::EsClient;
pub use response::{FacetBucket, SearchResponse};

use crate::error::Result;
use async_trait::async_trait;

/// Outcome of a delete-by-identifier call. A missing identifier is a no-op,
/// not an error, per the engine's delete semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// The request/response capability set this program needs from the search
/// engine. `EsClient` implements it over the REST API; tests substitute an
/// in-memory fake.
#[async_trait]
pub trait SearchEngine {
    /// Create a collection with default settings. The engine rejects the
    /// request if the collection already exists.
    async fn create_collection(&self, name: &str) -> Result<()>;

    /// Submit one document `{field: value}`; the engine assigns the
    /// identifier, which is returned.
    async fn index_document(&self, collection: &str, field: &str, value: &str) -> Result<String>;

    async fn delete_document(&self, collection: &str, id: &str) -> Result<DeleteOutcome>;

    /// Exact total document count in the collection.
    async fn document_count(&self, collection: &str) -> Result<u64>;

    /// Match query on `field == value`; returns the number of hits in the
    /// default response page.
    async fn search_by_field(&self, collection: &str, field: &str, value: &str) -> Result<usize>;

    /// Terms aggregation over distinct values of `field`.
    async fn terms_facet(&self, collection: &str, field: &str) -> Result<Vec<FacetBucket>>;
}
