//! In-process record store. Used by tests and `STORE_BACKEND=memory`.

use super::{compare_field, document_id, Filter, FindQuery, RecordStore, SortOrder};
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Documents per collection, in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Unavailable("memory store is closed".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_one(&self, collection: &str, doc: Value) -> Result<(), StoreError> {
        self.check_open()?;
        let id = document_id(&doc)?.to_string();
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|d| d.get("id").and_then(Value::as_str) == Some(id.as_str())) {
            return Err(StoreError::InvalidDocument(format!(
                "duplicate id '{}' in {}",
                id, collection
            )));
        }
        docs.push(doc);
        Ok(())
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>, StoreError> {
        self.check_open()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn find_many(&self, collection: &str, query: &FindQuery) -> Result<Vec<Value>, StoreError> {
        self.check_open()?;
        let collections = self.collections.read().await;
        let mut out: Vec<Value> = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| query.filter.matches(d)).cloned().collect())
            .unwrap_or_default();
        if let Some(sort) = &query.sort {
            match sort.order {
                SortOrder::Ascending => out.sort_by(|a, b| compare_field(a, b, &sort.field)),
                SortOrder::Descending => {
                    // Reverse first so the stable sort leaves ties newest first.
                    out.reverse();
                    out.sort_by(|a, b| compare_field(b, a, &sort.field));
                }
            }
        }
        if let Some(limit) = query.limit {
            out.truncate(limit);
        }
        Ok(out)
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        self.check_open()?;
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match docs.iter().position(|d| filter.matches(d)) {
            Some(pos) => {
                docs.remove(pos);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        self.check_open()?;
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|d| !filter.matches(d));
        Ok((before - docs.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
