//! Builds parameterized statements over `<schema>.<collection>` document tables.
//! Every table has the shape `(id TEXT PRIMARY KEY, doc JSONB NOT NULL, seq BIGSERIAL)`.

use crate::store::{Filter, FindQuery, SortOrder};
use serde_json::Value;

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

/// Escape a string for use inside a single-quoted SQL literal.
fn literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Statement text plus JSONB parameters, bound in order as $1, $2, ...
#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }

    /// Appends ` WHERE doc @> $n` unless the filter is empty.
    fn push_filter(&mut self, filter: &Filter) {
        if filter.is_empty() {
            return;
        }
        let n = self.push_param(filter.to_value());
        self.sql.push_str(&format!(" WHERE doc @> ${}", n));
    }
}

/// DDL for one collection table and its containment index.
pub fn create_collection(schema: &str, collection: &str) -> Vec<String> {
    let table = qualified_table(schema, collection);
    vec![
        format!(
            "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY, doc JSONB NOT NULL, seq BIGSERIAL NOT NULL)",
            table
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} USING GIN (doc jsonb_path_ops)",
            quoted(&format!("{}_doc_idx", collection)),
            table
        ),
    ]
}

/// INSERT one document; the key column is taken from the document's `id`.
pub fn insert(schema: &str, collection: &str, doc: Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(doc);
    q.sql = format!(
        "INSERT INTO {} (id, doc) VALUES (${n} ->> 'id', ${n})",
        qualified_table(schema, collection),
        n = n
    );
    q
}

/// SELECT documents matching the query. Ties in the sort field fall back to insertion order.
pub fn select(schema: &str, collection: &str, query: &FindQuery) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT doc FROM {}", qualified_table(schema, collection));
    q.push_filter(&query.filter);
    match &query.sort {
        Some(sort) => {
            let dir = match sort.order {
                SortOrder::Ascending => "ASC",
                SortOrder::Descending => "DESC",
            };
            q.sql.push_str(&format!(
                " ORDER BY doc ->> {} {dir}, seq {dir}",
                literal(&sort.field),
                dir = dir
            ));
        }
        None => q.sql.push_str(" ORDER BY seq ASC"),
    }
    if let Some(limit) = query.limit {
        q.sql.push_str(&format!(" LIMIT {}", limit));
    }
    q
}

/// DELETE the first matching document (by insertion order).
pub fn delete_one(schema: &str, collection: &str, filter: &Filter) -> QueryBuf {
    let table = qualified_table(schema, collection);
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT id FROM {}", table);
    q.push_filter(filter);
    q.sql = format!(
        "DELETE FROM {} WHERE id IN ({} ORDER BY seq ASC LIMIT 1)",
        table, q.sql
    );
    q
}

/// DELETE every matching document.
pub fn delete_many(schema: &str, collection: &str, filter: &Filter) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("DELETE FROM {}", qualified_table(schema, collection));
    q.push_filter(filter);
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Sort;
    use serde_json::json;

    #[test]
    fn quotes_identifiers() {
        assert_eq!(qualified_table("trip_planner", "trips"), "\"trip_planner\".\"trips\"");
        assert_eq!(quoted("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn insert_takes_key_from_document() {
        let q = insert("ns", "trips", json!({"id": "t1"}));
        assert_eq!(
            q.sql,
            "INSERT INTO \"ns\".\"trips\" (id, doc) VALUES ($1 ->> 'id', $1)"
        );
        assert_eq!(q.params, vec![json!({"id": "t1"})]);
    }

    #[test]
    fn select_with_filter_sort_and_limit() {
        let query = FindQuery::new(Filter::eq("trip_id", "t1"))
            .sort(Sort::asc("created_at"))
            .limit(1000);
        let q = select("ns", "places", &query);
        assert_eq!(
            q.sql,
            "SELECT doc FROM \"ns\".\"places\" WHERE doc @> $1 \
             ORDER BY doc ->> 'created_at' ASC, seq ASC LIMIT 1000"
        );
        assert_eq!(q.params, vec![json!({"trip_id": "t1"})]);
    }

    #[test]
    fn select_all_descending() {
        let q = select("ns", "trips", &FindQuery::default().sort(Sort::desc("created_at")));
        assert_eq!(
            q.sql,
            "SELECT doc FROM \"ns\".\"trips\" ORDER BY doc ->> 'created_at' DESC, seq DESC"
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn delete_one_limits_to_single_row() {
        let q = delete_one("ns", "places", &Filter::eq("id", "p1"));
        assert_eq!(
            q.sql,
            "DELETE FROM \"ns\".\"places\" WHERE id IN \
             (SELECT id FROM \"ns\".\"places\" WHERE doc @> $1 ORDER BY seq ASC LIMIT 1)"
        );
    }

    #[test]
    fn delete_many_by_filter() {
        let q = delete_many("ns", "places", &Filter::eq("trip_id", "t1"));
        assert_eq!(q.sql, "DELETE FROM \"ns\".\"places\" WHERE doc @> $1");
        assert_eq!(q.params.len(), 1);
    }

    #[test]
    fn collection_ddl_is_idempotent() {
        let ddl = create_collection("ns", "trips");
        assert_eq!(ddl.len(), 2);
        assert!(ddl.iter().all(|s| s.contains("IF NOT EXISTS")));
        assert!(ddl[1].contains("jsonb_path_ops"));
    }
}
