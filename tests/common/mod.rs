#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use portfolio_api::assets::{AssetStore, AssetStoreError, AssetUpload, StoredAsset};
use portfolio_api::state::AppState;
use portfolio_api::store::MemoryRecordStore;

/// Test credentials and secret, installed before the lazy config is touched.
pub fn init_test_env() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        std::env::set_var("JWT_SECRET", "test-secret");
        std::env::set_var("ADMIN_USERNAME", "admin");
        std::env::set_var("ADMIN_PASSWORD", "hunter2");
    });
}

/// Asset store double that records every store and delete request, with a
/// switch to make deletes fail (they must be tolerated by the managers).
#[derive(Default)]
pub struct RecordingAssetStore {
    seq: AtomicUsize,
    pub stored: Mutex<Vec<StoredAsset>>,
    pub deleted: Mutex<Vec<String>>,
    pub fail_deletes: AtomicBool,
}

impl RecordingAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored_assets(&self) -> Vec<StoredAsset> {
        self.stored.lock().unwrap().clone()
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn delete_requests_for(&self, asset_id: &str) -> usize {
        self.deleted.lock().unwrap().iter().filter(|id| id.as_str() == asset_id).count()
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AssetStore for RecordingAssetStore {
    async fn store(&self, _upload: AssetUpload, folder: &str) -> Result<StoredAsset, AssetStoreError> {
        let n = self.seq.fetch_add(1, Ordering::SeqCst);
        let asset_id = format!("{}/asset-{}", folder, n);
        let asset = StoredAsset {
            url: format!("https://assets.test/{}", asset_id),
            asset_id,
        };
        self.stored.lock().unwrap().push(asset.clone());
        Ok(asset)
    }

    async fn delete(&self, asset_id: &str) -> Result<(), AssetStoreError> {
        self.deleted.lock().unwrap().push(asset_id.to_string());
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AssetStoreError::Io(std::io::Error::other("simulated delete failure")));
        }
        Ok(())
    }
}

/// In-memory application state plus handles to the store doubles.
pub fn build_state() -> (AppState, Arc<MemoryRecordStore>, Arc<RecordingAssetStore>) {
    init_test_env();
    let records = Arc::new(MemoryRecordStore::new());
    let assets = Arc::new(RecordingAssetStore::new());
    let state = AppState::new(records.clone(), assets.clone());
    (state, records, assets)
}

pub fn build_app() -> (Router, Arc<MemoryRecordStore>, Arc<RecordingAssetStore>) {
    let (state, records, assets) = build_state();
    (portfolio_api::app(state), records, assets)
}

pub fn admin_token() -> String {
    init_test_env();
    let claims = portfolio_api::auth::Claims::admin("admin".to_string());
    portfolio_api::auth::generate_jwt(claims).expect("token")
}

pub async fn request(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, path: &str) -> Response<Body> {
    request(app, Method::GET, path, None, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Hand-rolled multipart body for upload endpoints.
pub struct MultipartBody {
    boundary: String,
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self { boundary: "portfolio-test-boundary".to_string(), buf: Vec::new() }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                self.boundary, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.buf.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        let content_type = format!("multipart/form-data; boundary={}", self.boundary);
        (content_type, self.buf)
    }
}

pub async fn multipart_request(
    app: Router,
    method: Method,
    path: &str,
    token: &str,
    body: MultipartBody,
) -> Response<Body> {
    let (content_type, bytes) = body.finish();
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", content_type)
        .body(Body::from(bytes))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub fn assert_status(response: &Response<Body>, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}
