use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Document, RecordStore, StoreError};

/// Postgres-backed document store. Every record lives in a single `documents`
/// table as a JSONB body keyed by (collection, id); filters use JSONB
/// containment so the trait's field-equality semantics hold.
pub struct PostgresRecordStore {
    pool: PgPool,
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    collection  TEXT NOT NULL,
    id          UUID NOT NULL,
    body        JSONB NOT NULL,
    inserted_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (collection, id)
)
"#;

impl PostgresRecordStore {
    /// Connect and make sure the documents table exists.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        sqlx::query(SCHEMA).execute(&pool).await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    fn body_to_document(body: Value) -> Result<Document, StoreError> {
        match body {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::Query(format!("unexpected document body: {}", other))),
        }
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn find_one(&self, collection: &str, filter: &Value) -> Result<Option<Document>, StoreError> {
        let body: Option<Value> = sqlx::query_scalar(
            "SELECT body FROM documents WHERE collection = $1 AND body @> $2 ORDER BY inserted_at LIMIT 1",
        )
        .bind(collection)
        .bind(filter)
        .fetch_optional(&self.pool)
        .await?;

        body.map(Self::body_to_document).transpose()
    }

    async fn find_many(&self, collection: &str, filter: &Value) -> Result<Vec<Document>, StoreError> {
        let bodies: Vec<Value> = sqlx::query_scalar(
            "SELECT body FROM documents WHERE collection = $1 AND body @> $2 ORDER BY inserted_at",
        )
        .bind(collection)
        .bind(filter)
        .fetch_all(&self.pool)
        .await?;

        bodies.into_iter().map(Self::body_to_document).collect()
    }

    async fn insert(&self, collection: &str, mut doc: Document) -> Result<Document, StoreError> {
        let id = Uuid::new_v4();
        doc.insert("id".to_string(), Value::String(id.to_string()));

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(id)
            .bind(Value::Object(doc.clone()))
            .execute(&self.pool)
            .await?;

        Ok(doc)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        mut patch: Document,
    ) -> Result<Option<Document>, StoreError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };
        patch.remove("id");

        // JSONB || is a shallow merge, matching the trait contract.
        let body: Option<Value> = sqlx::query_scalar(
            "UPDATE documents SET body = body || $3 WHERE collection = $1 AND id = $2 RETURNING body",
        )
        .bind(collection)
        .bind(id)
        .bind(Value::Object(patch))
        .fetch_optional(&self.pool)
        .await?;

        body.map(Self::body_to_document).transpose()
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn upsert_one(
        &self,
        collection: &str,
        filter: &Value,
        patch: Document,
    ) -> Result<Document, StoreError> {
        // Serialize upserts per collection with a transaction-scoped advisory
        // lock. Row locks alone cannot close the race where two transactions
        // find no row and both insert.
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(collection)
            .execute(&mut *tx)
            .await?;

        let existing: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM documents WHERE collection = $1 AND body @> $2 ORDER BY inserted_at LIMIT 1",
        )
        .bind(collection)
        .bind(filter)
        .fetch_optional(&mut *tx)
        .await?;

        let body: Value = match existing {
            Some(id) => {
                let mut patch = patch;
                patch.remove("id");
                sqlx::query_scalar(
                    "UPDATE documents SET body = body || $3 WHERE collection = $1 AND id = $2 RETURNING body",
                )
                .bind(collection)
                .bind(id)
                .bind(Value::Object(patch))
                .fetch_one(&mut *tx)
                .await?
            }
            None => {
                let id = Uuid::new_v4();
                let mut doc = patch;
                doc.insert("id".to_string(), Value::String(id.to_string()));

                sqlx::query_scalar(
                    "INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3) RETURNING body",
                )
                .bind(collection)
                .bind(id)
                .bind(Value::Object(doc))
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;

        Self::body_to_document(body)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
