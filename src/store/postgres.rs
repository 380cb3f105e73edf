//! PostgreSQL record store. Each collection is a JSONB document table inside
//! one schema (the store namespace).

use super::{document_id, Filter, FindQuery, RecordStore};
use crate::error::StoreError;
use crate::settings::Settings;
use crate::sql::{self, quoted, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool, Row};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    /// Open the shared pool. The pool is closed again by [`RecordStore::close`].
    pub async fn connect(settings: &Settings) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.database_url)
            .await?;
        Ok(Self::from_pool(pool, &settings.namespace))
    }

    pub fn from_pool(pool: PgPool, schema: &str) -> Self {
        PgStore {
            pool,
            schema: schema.to_string(),
        }
    }

    /// Create the namespace schema and one table per collection if missing.
    pub async fn ensure_collections(&self, collections: &[&str]) -> Result<(), StoreError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(&self.schema)))
            .execute(&self.pool)
            .await?;
        for collection in collections {
            for ddl in sql::create_collection(&self.schema, collection) {
                sqlx::query(&ddl).execute(&self.pool).await?;
            }
        }
        tracing::info!(schema = %self.schema, ?collections, "collections ready");
        Ok(())
    }

    async fn execute(&self, q: QueryBuf) -> Result<u64, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        Ok(query.execute(&self.pool).await?.rows_affected())
    }

    async fn fetch_docs(&self, q: QueryBuf) -> Result<Vec<Value>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|r| r.try_get::<Value, _>("doc").map_err(StoreError::from))
            .collect()
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn insert_one(&self, collection: &str, doc: Value) -> Result<(), StoreError> {
        document_id(&doc)?;
        self.execute(sql::insert(&self.schema, collection, doc)).await?;
        Ok(())
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>, StoreError> {
        let query = FindQuery::new(filter.clone()).limit(1);
        let docs = self.fetch_docs(sql::select(&self.schema, collection, &query)).await?;
        Ok(docs.into_iter().next())
    }

    async fn find_many(&self, collection: &str, query: &FindQuery) -> Result<Vec<Value>, StoreError> {
        self.fetch_docs(sql::select(&self.schema, collection, query)).await
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        self.execute(sql::delete_one(&self.schema, collection, filter)).await
    }

    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        self.execute(sql::delete_many(&self.schema, collection, filter)).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("record store closed");
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before [`PgStore::connect`].
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StoreError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| StoreError::Unavailable("DATABASE_URL: no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, query)) => (name.trim(), Some(query)),
        None => (path_and_query.trim(), None),
    };
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = match query {
        Some(query) => format!("{}postgres?{}", base, query),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}
