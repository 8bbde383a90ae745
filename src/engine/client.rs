// file: src/engine/client.rs
// description: HTTP client for the search engine's JSON document API
// reference: https://www.elastic.co/guide/en/elasticsearch/reference/current/rest-apis.html

use crate::config::EngineConfig;
use crate::engine::response::{DeleteResponse, FacetBucket, IndexResponse, SearchResponse};
use crate::engine::{DeleteOutcome, SearchEngine};
use crate::error::{LoaderError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

pub struct EsClient {
    http: Client,
    base_url: String,
}

impl EsClient {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url(),
        }
    }

    /// Probe the engine root endpoint. `Ok(false)` means the engine answered
    /// with a non-success status; transport failures surface as errors.
    pub async fn ping(&self) -> Result<bool> {
        debug!("Pinging search engine at {}", self.base_url);
        let response = self.http.get(&self.base_url).send().await?;
        Ok(response.status().is_success())
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    fn doc_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/_doc/{}", self.base_url, collection, id)
    }

    async fn ensure_success(response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(LoaderError::Engine { status, body })
    }

    async fn search(&self, collection: &str, body: &Value) -> Result<SearchResponse> {
        let url = format!("{}/_search", self.collection_url(collection));
        let response = self.http.post(&url).json(body).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<SearchResponse>().await?)
    }
}

/// `_search` body for a count-only request. `track_total_hits` keeps the
/// total exact past the engine's default counting cap.
pub fn count_body() -> Value {
    json!({ "size": 0, "track_total_hits": true })
}

/// `_search` body for a match query on one field.
pub fn match_query_body(field: &str, value: &str) -> Value {
    let mut clause = Map::new();
    clause.insert(field.to_string(), Value::String(value.to_string()));
    json!({ "query": { "match": Value::Object(clause) } })
}

/// `_search` body for a terms aggregation over the keyword sub-field.
pub fn terms_facet_body(field: &str) -> Value {
    json!({
        "size": 0,
        "aggs": { "values": { "terms": { "field": format!("{}.keyword", field) } } }
    })
}

#[async_trait]
impl SearchEngine for EsClient {
    async fn create_collection(&self, name: &str) -> Result<()> {
        info!("Creating collection: {}", name);
        let response = self.http.put(self.collection_url(name)).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn index_document(&self, collection: &str, field: &str, value: &str) -> Result<String> {
        let mut doc = Map::new();
        doc.insert(field.to_string(), Value::String(value.to_string()));

        let url = format!("{}/_doc", self.collection_url(collection));
        let response = self.http.post(&url).json(&doc).send().await?;
        let response = Self::ensure_success(response).await?;

        let indexed = response.json::<IndexResponse>().await?;
        debug!("Indexed document {} into {}", indexed.id, collection);
        Ok(indexed.id)
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<DeleteOutcome> {
        let response = self
            .http
            .delete(self.doc_url(collection, id))
            .send()
            .await?;

        // A missing document comes back 404 with result "not_found"; that is
        // a no-op, not a failure. A 404 without that marker (e.g. missing
        // collection) stays an error.
        if response.status() == StatusCode::NOT_FOUND {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            if let Ok(deleted) = serde_json::from_str::<DeleteResponse>(&body) {
                if deleted.result == "not_found" {
                    return Ok(DeleteOutcome::NotFound);
                }
            }
            return Err(LoaderError::Engine { status: 404, body });
        }

        let response = Self::ensure_success(response).await?;
        response.json::<DeleteResponse>().await?;
        Ok(DeleteOutcome::Deleted)
    }

    async fn document_count(&self, collection: &str) -> Result<u64> {
        let response = self.search(collection, &count_body()).await?;
        Ok(response.hits.total.value)
    }

    async fn search_by_field(&self, collection: &str, field: &str, value: &str) -> Result<usize> {
        let body = match_query_body(field, value);
        let response = self.search(collection, &body).await?;
        Ok(response.hits.hits.len())
    }

    async fn terms_facet(&self, collection: &str, field: &str) -> Result<Vec<FacetBucket>> {
        let body = terms_facet_body(field);
        let response = self.search(collection, &body).await?;
        Ok(response
            .aggregations
            .map(|aggs| aggs.values.buckets)
            .unwrap_or_default())
    }
}
