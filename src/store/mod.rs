//! Record store: named collections of JSON documents keyed by a string `id`.
//!
//! Services only see [`RecordStore`]. [`PgStore`] persists to PostgreSQL;
//! [`MemoryStore`] keeps everything in process.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::StoreError;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

pub const TRIPS: &str = "trips";
pub const PLACES: &str = "places";

/// Every collection the service uses.
pub const COLLECTIONS: &[&str] = &[TRIPS, PLACES];

/// Equality match on top-level fields. Empty matches everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter(Map<String, Value>);

impl Filter {
    pub fn all() -> Self {
        Filter(Map::new())
    }

    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Filter::all().and(field, value)
    }

    pub fn and(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.0.iter().all(|(k, v)| doc.get(k) == Some(v))
    }

    /// Filter as a JSON object, usable as a containment pattern.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn asc(field: &str) -> Self {
        Sort {
            field: field.to_string(),
            order: SortOrder::Ascending,
        }
    }

    pub fn desc(field: &str) -> Self {
        Sort {
            field: field.to_string(),
            order: SortOrder::Descending,
        }
    }
}

/// Arguments to [`RecordStore::find_many`].
#[derive(Clone, Debug, Default)]
pub struct FindQuery {
    pub filter: Filter,
    pub sort: Option<Sort>,
    pub limit: Option<usize>,
}

impl FindQuery {
    pub fn new(filter: Filter) -> Self {
        FindQuery {
            filter,
            ..Default::default()
        }
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Collection-oriented document store. Operations are independent; nothing
/// spans more than one call.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Insert one document. It must carry a string `id`.
    async fn insert_one(&self, collection: &str, doc: Value) -> Result<(), StoreError>;

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>, StoreError>;

    /// Matching documents, sorted and capped as requested. Ties in the sort
    /// field keep insertion order in the direction of the sort.
    async fn find_many(&self, collection: &str, query: &FindQuery) -> Result<Vec<Value>, StoreError>;

    /// Delete the first match. Returns the number of documents removed (0 or 1).
    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    /// Delete every match. Returns the number of documents removed.
    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release the underlying connection. Called once at shutdown.
    async fn close(&self);
}

pub fn to_document<T: Serialize>(record: &T) -> Result<Value, StoreError> {
    let doc = serde_json::to_value(record)?;
    document_id(&doc)?;
    Ok(doc)
}

pub fn from_document<T: DeserializeOwned>(doc: Value) -> Result<T, StoreError> {
    Ok(serde_json::from_value(doc)?)
}

pub(crate) fn document_id(doc: &Value) -> Result<&str, StoreError> {
    doc.get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::InvalidDocument("document must have a string 'id'".into()))
}

/// Order two documents by a top-level field. Missing fields sort first.
pub(crate) fn compare_field(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => compare_values(x, y),
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_matches_all_pairs() {
        let doc = json!({"id": "p1", "trip_id": "t1", "name": "Louvre"});
        assert!(Filter::all().matches(&doc));
        assert!(Filter::eq("trip_id", "t1").matches(&doc));
        assert!(!Filter::eq("trip_id", "t2").matches(&doc));
        assert!(!Filter::eq("trip_id", "t1").and("name", "Orsay").matches(&doc));
        assert!(!Filter::eq("missing", "x").matches(&doc));
    }

    #[test]
    fn documents_require_string_id() {
        assert!(to_document(&json!({"id": "a"})).is_ok());
        assert!(matches!(
            to_document(&json!({"id": 7})),
            Err(StoreError::InvalidDocument(_))
        ));
    }

    #[test]
    fn compare_field_orders_strings_and_missing() {
        let a = json!({"created_at": "2024-01-01T00:00:00.000000Z"});
        let b = json!({"created_at": "2024-01-02T00:00:00.000000Z"});
        let none = json!({});
        assert_eq!(compare_field(&a, &b, "created_at"), Ordering::Less);
        assert_eq!(compare_field(&none, &a, "created_at"), Ordering::Less);
        assert_eq!(compare_field(&a, &a, "created_at"), Ordering::Equal);
    }
}
