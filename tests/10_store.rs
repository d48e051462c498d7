use std::sync::Arc;

use serde_json::{json, Value};
use uuid::Uuid;

use portfolio_api::store::{Document, MemoryRecordStore, PostgresRecordStore, RecordStore};

fn doc(v: Value) -> Document {
    v.as_object().unwrap().clone()
}

#[tokio::test]
async fn concurrent_memory_upserts_keep_a_single_row() {
    let store = Arc::new(MemoryRecordStore::new());

    let mut handles = Vec::new();
    for n in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.upsert_one("profiles", &json!({}), doc(json!({ "n": n }))).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let rows = store.find_many("profiles", &json!({})).await.unwrap();
    assert_eq!(rows.len(), 1);
}

/// Needs a reachable Postgres; skipped when DATABASE_URL is unset.
#[tokio::test]
async fn concurrent_postgres_upserts_keep_a_single_row() {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        return;
    };
    let store = Arc::new(PostgresRecordStore::connect(&url, 5).await.unwrap());

    for trial in 0..4 {
        // Fresh collection per trial so the empty-filter upserts start from
        // an empty table, the window where both writers can race to insert.
        let collection = format!("singleton_{}_{}", Uuid::new_v4().simple(), trial);

        let a = {
            let store = store.clone();
            let collection = collection.clone();
            tokio::spawn(async move {
                store.upsert_one(&collection, &json!({}), doc(json!({ "writer": "a" }))).await
            })
        };
        let b = {
            let store = store.clone();
            let collection = collection.clone();
            tokio::spawn(async move {
                store.upsert_one(&collection, &json!({}), doc(json!({ "writer": "b" }))).await
            })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let rows = store.find_many(&collection, &json!({})).await.unwrap();
        assert_eq!(rows.len(), 1, "trial {}: concurrent upserts left {} rows", trial, rows.len());
    }
}
