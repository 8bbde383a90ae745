// file: src/engine/fake.rs
// description: in-memory SearchEngine used by unit tests in place of a live engine

use crate::engine::response::FacetBucket;
use crate::engine::{DeleteOutcome, SearchEngine};
use crate::error::{LoaderError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
struct StoredDoc {
    id: String,
    field: String,
    value: String,
}

/// Mirrors the engine semantics this program relies on: collections are
/// auto-created on first document, create of an existing collection is
/// rejected, delete of a missing id is a no-op.
#[derive(Default)]
pub struct InMemoryEngine {
    collections: Mutex<HashMap<String, Vec<StoredDoc>>>,
    next_id: AtomicUsize,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_collection(&self, name: &str) -> bool {
        self.collections.lock().unwrap().contains_key(name)
    }

    /// (field, value) pairs of every document in a collection, in insertion
    /// order.
    pub fn documents(&self, collection: &str) -> Vec<(String, String)> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|doc| (doc.field.clone(), doc.value.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl SearchEngine for InMemoryEngine {
    async fn create_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.lock().unwrap();
        if collections.contains_key(name) {
            return Err(LoaderError::Engine {
                status: 400,
                body: format!("resource_already_exists_exception: {}", name),
            });
        }
        collections.insert(name.to_string(), Vec::new());
        Ok(())
    }

    async fn index_document(&self, collection: &str, field: &str, value: &str) -> Result<String> {
        let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredDoc {
                id: id.clone(),
                field: field.to_string(),
                value: value.to_string(),
            });
        Ok(id)
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<DeleteOutcome> {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| LoaderError::Engine {
                status: 404,
                body: format!("index_not_found_exception: {}", collection),
            })?;

        match docs.iter().position(|doc| doc.id == id) {
            Some(position) => {
                docs.remove(position);
                Ok(DeleteOutcome::Deleted)
            }
            None => Ok(DeleteOutcome::NotFound),
        }
    }

    async fn document_count(&self, collection: &str) -> Result<u64> {
        let collections = self.collections.lock().unwrap();
        let docs = collections
            .get(collection)
            .ok_or_else(|| LoaderError::Engine {
                status: 404,
                body: format!("index_not_found_exception: {}", collection),
            })?;
        Ok(docs.len() as u64)
    }

    async fn search_by_field(&self, collection: &str, field: &str, value: &str) -> Result<usize> {
        let collections = self.collections.lock().unwrap();
        let docs = collections
            .get(collection)
            .ok_or_else(|| LoaderError::Engine {
                status: 404,
                body: format!("index_not_found_exception: {}", collection),
            })?;
        Ok(docs
            .iter()
            .filter(|doc| doc.field == field && doc.value == value)
            .count())
    }

    async fn terms_facet(&self, collection: &str, field: &str) -> Result<Vec<FacetBucket>> {
        let collections = self.collections.lock().unwrap();
        let docs = collections
            .get(collection)
            .ok_or_else(|| LoaderError::Engine {
                status: 404,
                body: format!("index_not_found_exception: {}", collection),
            })?;

        let mut counts: HashMap<String, u64> = HashMap::new();
        for doc in docs.iter().filter(|doc| doc.field == field) {
            *counts.entry(doc.value.clone()).or_default() += 1;
        }

        let mut buckets: Vec<FacetBucket> = counts
            .into_iter()
            .map(|(key, doc_count)| FacetBucket { key, doc_count })
            .collect();
        // Engine ordering: count descending, key ascending to break ties.
        buckets.sort_by(|a, b| b.doc_count.cmp(&a.doc_count).then(a.key.cmp(&b.key)));
        Ok(buckets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_create_twice_is_rejected() {
        let engine = InMemoryEngine::new();
        engine.create_collection("Hash_Maha").await.unwrap();
        assert!(engine.create_collection("Hash_Maha").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_decrements_count_and_missing_id_is_noop() {
        let engine = InMemoryEngine::new();
        engine.create_collection("Hash_Maha").await.unwrap();
        let id = engine
            .index_document("Hash_Maha", "Department", "Sales")
            .await
            .unwrap();
        assert_eq!(engine.document_count("Hash_Maha").await.unwrap(), 1);

        let outcome = engine.delete_document("Hash_Maha", &id).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(engine.document_count("Hash_Maha").await.unwrap(), 0);

        let outcome = engine.delete_document("Hash_Maha", "E02003").await.unwrap();
        assert_eq!(outcome, DeleteOutcome::NotFound);
        assert_eq!(engine.document_count("Hash_Maha").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_facet_groups_by_value() {
        let engine = InMemoryEngine::new();
        for value in ["Sales", "IT", "IT"] {
            engine
                .index_document("Hash_Maha", "Department", value)
                .await
                .unwrap();
        }

        let buckets = engine.terms_facet("Hash_Maha", "Department").await.unwrap();
        assert_eq!(
            buckets,
            vec![
                FacetBucket { key: "IT".to_string(), doc_count: 2 },
                FacetBucket { key: "Sales".to_string(), doc_count: 1 },
            ]
        );
    }
}
