use axum::routing::{get, post, put};
use axum::{extract::State, Json, Router};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod assets;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod managers;
pub mod middleware;
pub mod models;
pub mod state;
pub mod store;

use state::AppState;

/// Build the full application router over the given stores.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/", get(root))
        .route("/health", get(health))
        // Public read-only API
        .nest("/api/public", public_routes())
        // Token acquisition
        .nest("/api/auth", auth_routes())
        // Admin API, bearer-gated as a whole
        .nest("/api/admin", admin_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/profile", get(public::get_profile))
        .route("/all", get(public::get_all))
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new().route("/login", post(auth::login))
}

fn admin_routes() -> Router<AppState> {
    use handlers::admin;

    Router::new()
        // Singletons
        .route("/profile", put(admin::profile::update_profile))
        .route("/upload-profile-image", post(admin::profile::upload_profile_image))
        .route("/cv", get(admin::cv::get_cv).post(admin::cv::upload_cv))
        // Image-bearing records
        .route("/projects", post(admin::projects::create))
        .route(
            "/projects/:id",
            put(admin::projects::update).delete(admin::projects::delete),
        )
        .route("/casestudies", post(admin::casestudies::create))
        .route(
            "/casestudies/:id",
            put(admin::casestudies::update).delete(admin::casestudies::delete),
        )
        // Plain records
        .route("/socials/upsert", post(admin::socials::upsert))
        .route("/socials/:id", put(admin::socials::update).delete(admin::socials::delete))
        .route("/techs", post(admin::techs::create))
        .route("/techs/:id", put(admin::techs::update).delete(admin::techs::delete))
        .route("/certificates", post(admin::certificates::create))
        .route(
            "/certificates/:id",
            put(admin::certificates::update).delete(admin::certificates::delete),
        )
        .route("/testimonials", post(admin::testimonials::create))
        .route(
            "/testimonials/:id",
            put(admin::testimonials::update).delete(admin::testimonials::delete),
        )
        .route("/experience", get(admin::experience::list).post(admin::experience::create))
        .route(
            "/experience/:id",
            put(admin::experience::update).delete(admin::experience::delete),
        )
        .route_layer(axum::middleware::from_fn(middleware::admin_auth_middleware))
}

async fn root() -> &'static str {
    "Portfolio Backend is running"
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.records.ping().await {
        Ok(()) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "record store unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "store_error": e.to_string()
                }
            })),
        ),
    }
}
