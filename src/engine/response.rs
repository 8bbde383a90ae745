// file: src/engine/response.rs
// description: typed response envelopes for the engine's JSON document API
// reference: Elasticsearch 7+ search/index/delete response shapes

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope of a `_search` response. Aggregations are present only when the
/// request asked for them.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub hits: HitsEnvelope,
    #[serde(default)]
    pub aggregations: Option<Aggregations>,
}

#[derive(Debug, Deserialize)]
pub struct HitsEnvelope {
    pub total: TotalHits,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// ES 7 object form of the total: `{"value": N, "relation": "eq"}`.
#[derive(Debug, Deserialize)]
pub struct TotalHits {
    pub value: u64,
    #[serde(default)]
    pub relation: String,
}

#[derive(Debug, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: Value,
}

/// Aggregations keyed by the single name this program uses in requests.
#[derive(Debug, Deserialize)]
pub struct Aggregations {
    pub values: TermsAggregation,
}

#[derive(Debug, Deserialize)]
pub struct TermsAggregation {
    pub buckets: Vec<FacetBucket>,
}

/// One distinct value with its document count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetBucket {
    pub key: String,
    pub doc_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct IndexResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub result: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteResponse {
    pub result: String,
}
