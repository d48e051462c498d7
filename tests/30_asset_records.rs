mod common;

use serde_json::{json, Value};

use portfolio_api::assets::AssetUpload;
use portfolio_api::managers::ManagerError;
use portfolio_api::store::{Document, RecordStore};

fn doc(v: Value) -> Document {
    v.as_object().unwrap().clone()
}

fn png_upload(name: &str) -> AssetUpload {
    AssetUpload {
        bytes: vec![0x89, b'P', b'N', b'G'],
        file_name: name.to_string(),
        content_type: Some("image/png".to_string()),
    }
}

#[tokio::test]
async fn create_without_asset_is_a_validation_error() {
    let (state, _records, assets) = common::build_state();
    let manager = state.case_study_manager();

    let result = manager
        .create(doc(json!({"title": "A", "description": "d"})), None)
        .await;
    assert!(matches!(result, Err(ManagerError::Validation(_))));

    // Rejected before any asset-store call
    assert!(assets.stored_assets().is_empty());
}

#[tokio::test]
async fn create_with_missing_required_field_is_rejected_before_any_call() {
    let (state, records, assets) = common::build_state();
    let manager = state.project_manager();

    // "type" is required for projects
    let result = manager
        .create(doc(json!({"title": "Site"})), Some(png_upload("a.png")))
        .await;
    assert!(matches!(result, Err(ManagerError::Validation(_))));

    assert!(assets.stored_assets().is_empty());
    assert!(records.find_many("projects", &json!({})).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_of_unknown_id_fails_before_mutation() {
    let (state, _records, assets) = common::build_state();
    let manager = state.project_manager();

    let result = manager
        .update("b8d3a1de-0000-0000-0000-000000000000", doc(json!({"title": "B"})), Some(png_upload("b.png")))
        .await;
    assert!(matches!(result, Err(ManagerError::NotFound(_))));

    // The new asset was never stored
    assert!(assets.stored_assets().is_empty());
}

#[tokio::test]
async fn remove_of_unknown_id_issues_no_asset_calls() {
    let (state, _records, assets) = common::build_state();
    let manager = state.case_study_manager();

    let result = manager.remove("b8d3a1de-0000-0000-0000-000000000000").await;
    assert!(matches!(result, Err(ManagerError::NotFound(_))));
    assert!(assets.deleted_ids().is_empty());
}

#[tokio::test]
async fn case_study_lifecycle_replaces_and_cleans_up_assets() {
    let (state, records, assets) = common::build_state();
    let manager = state.case_study_manager();

    // Create with asset X
    let created = manager
        .create(doc(json!({"title": "A", "description": "d"})), Some(png_upload("x.png")))
        .await
        .unwrap();
    let id = created.get("id").and_then(Value::as_str).unwrap().to_string();
    let x = assets.stored_assets()[0].clone();
    assert_eq!(created.get("imageUrl"), Some(&json!(x.url)));
    assert_eq!(created.get("imagePublicId"), Some(&json!(x.asset_id)));

    // Update with asset Y: X deleted exactly once, record points at Y
    let updated = manager
        .update(&id, doc(json!({"description": "d2"})), Some(png_upload("y.png")))
        .await
        .unwrap();
    let y = assets.stored_assets()[1].clone();
    assert_eq!(assets.delete_requests_for(&x.asset_id), 1);
    assert_eq!(updated.get("imageUrl"), Some(&json!(y.url)));
    assert_eq!(updated.get("imagePublicId"), Some(&json!(y.asset_id)));

    // Update without asset: fields change, asset fields byte-identical
    let updated = manager.update(&id, doc(json!({"title": "B"})), None).await.unwrap();
    assert_eq!(updated.get("title"), Some(&json!("B")));
    assert_eq!(updated.get("imageUrl"), Some(&json!(y.url)));
    assert_eq!(updated.get("imagePublicId"), Some(&json!(y.asset_id)));
    assert_eq!(assets.delete_requests_for(&y.asset_id), 0);

    // Remove: Y deleted, record gone
    manager.remove(&id).await.unwrap();
    assert_eq!(assets.delete_requests_for(&y.asset_id), 1);
    let remaining = records.find_many("casestudies", &json!({"id": id})).await.unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn update_tolerates_old_asset_delete_failure() {
    let (state, _records, assets) = common::build_state();
    let manager = state.project_manager();

    let created = manager
        .create(doc(json!({"title": "Site", "type": "Web"})), Some(png_upload("x.png")))
        .await
        .unwrap();
    let id = created.get("id").and_then(Value::as_str).unwrap().to_string();
    let x = assets.stored_assets()[0].clone();

    assets.set_fail_deletes(true);
    let updated = manager
        .update(&id, doc(json!({"title": "Site v2"})), Some(png_upload("y.png")))
        .await
        .unwrap();
    let y = assets.stored_assets()[1].clone();

    // Delete was requested and failed; the record still points at the new asset
    assert_eq!(assets.delete_requests_for(&x.asset_id), 1);
    assert_eq!(updated.get("imagePublicId"), Some(&json!(y.asset_id)));
    assert_eq!(updated.get("title"), Some(&json!("Site v2")));
}
