use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::{
    Router,
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

use crate::actions;
use crate::field_coords::FieldCoordinates;
use crate::records::Dataset;

/// Uploads fit comfortably under this; a season of club flying is a few
/// thousand rows.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

// App state shared across handlers. The dataset is replaced wholesale on
// upload; readers take their own snapshot per request.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<RwLock<Option<Dataset>>>,
    pub coords: Arc<FieldCoordinates>,
}

impl AppState {
    pub fn new(coords: FieldCoordinates) -> Self {
        Self {
            dataset: Arc::new(RwLock::new(None)),
            coords: Arc::new(coords),
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

// Request logging with a short correlation id, so an upload and the
// dashboard recomputations it triggers can be matched up in the logs.
async fn request_logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = Uuid::new_v4().to_string()[..8].to_string();
    let started = Instant::now();

    info!("[{}] {} {}", request_id, method, path);

    let response = next.run(request).await;

    info!(
        "[{}] {} {} -> {} ({:.1}ms)",
        request_id,
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_secs_f64() * 1000.0
    );

    response
}

/// Build the application router. Exposed separately from the server loop
/// so integration tests can drive it without a socket.
pub fn app_router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/upload", post(actions::upload_workbook))
        .route("/dashboard", get(actions::get_dashboard))
        .route("/options", get(actions::get_filter_options))
        .route("/export", get(actions::export_filtered))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(CorsLayer::permissive())
}

pub async fn start_web_server(interface: String, port: u16, coords: FieldCoordinates) -> Result<()> {
    info!("Starting web server on {}:{}", interface, port);

    let app = app_router(AppState::new(coords));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", interface, port)).await?;
    info!("Web server listening on http://{}:{}", interface, port);

    axum::serve(listener, app).await?;

    Ok(())
}
