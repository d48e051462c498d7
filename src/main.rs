use std::sync::Arc;

use tower_http::services::ServeDir;

use portfolio_api::assets::LocalAssetStore;
use portfolio_api::state::AppState;
use portfolio_api::store::PostgresRecordStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = portfolio_api::config::config();

    let records = PostgresRecordStore::connect(&config.database.url, config.database.max_connections)
        .await
        .unwrap_or_else(|e| panic!("failed to connect record store: {}", e));

    let assets =
        LocalAssetStore::new(config.uploads.dir.clone(), config.uploads.public_prefix.clone());

    let state = AppState::new(Arc::new(records), Arc::new(assets));

    // Serve uploaded assets statically alongside the API
    let app = portfolio_api::app(state)
        .nest_service(&config.uploads.public_prefix, ServeDir::new(&config.uploads.dir));

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("portfolio API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
