pub mod api;
pub mod config;
pub mod errors;
pub mod problem;
mod security_headers;
pub mod tracing_setup;

use std::sync::Arc;

use axum::routing::get;
use config::AppConfig;
use storage::memory::MemoryStore;
use tower::ServiceBuilder;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub config: AppConfig,
    pub store: MemoryStore,
}

impl AppStateInner {
    pub fn new(config: AppConfig) -> AppState {
        Arc::new(AppStateInner {
            store: MemoryStore::new(),
            config,
        })
    }
}

pub fn make_app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/", get(|| async { "This is sipd: everything flows" }))
        .nest("/v0", api::make_router())
        .layer(
            ServiceBuilder::new()
                .layer(security_headers::cors())
                .layer(axum::middleware::from_fn(security_headers::headers)),
        )
        .with_state(state)
        .route("/healthcheck", get(|| async { "ok" }))
}
