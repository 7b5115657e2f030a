use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::AppConfig;
use crate::db::memory::InMemoryStore;
use crate::db::repository::{NewsRepository, PmResourceRepository};
use crate::error::AppError;

/// Shared handler state. Cloned per request; the repositories are shared.
#[derive(Clone)]
pub struct AppState {
    pub news_repo: Arc<dyn NewsRepository>,
    pub pm_resource_repo: Arc<dyn PmResourceRepository>,
}

impl AppState {
    /// Serve both collections from one in-memory store.
    pub fn from_store(store: Arc<InMemoryStore>) -> Self {
        Self {
            news_repo: store.clone(),
            pm_resource_repo: store,
        }
    }
}

/// The REST API, mounted under `/api` by [`router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/news",
            get(api::news::list_news_handler).post(api::news::create_news_handler),
        )
        .route(
            "/news/{id}",
            get(api::news::get_news_handler)
                .patch(api::news::update_news_handler)
                .delete(api::news::delete_news_handler),
        )
        .route(
            "/pm-resources",
            get(api::pm_resources::list_pm_resources_handler)
                .post(api::pm_resources::create_pm_resource_handler),
        )
        .route(
            "/pm-resources/{id}",
            get(api::pm_resources::get_pm_resource_handler)
                .patch(api::pm_resources::update_pm_resource_handler)
                .delete(api::pm_resources::delete_pm_resource_handler),
        )
        .route("/filters", get(api::filters::filter_options_handler))
        .fallback(api_not_found)
}

async fn api_not_found() -> AppError {
    AppError::NotFound("Not found".into())
}

/// Build the full application router.
///
/// Non-API paths fall through to `static_dir` (with `index.html` for client-side
/// routes) when one is configured.
pub fn router(state: AppState, config: &AppConfig) -> Router {
    let mut app = Router::new()
        .nest("/api", api_routes())
        .with_state(state);

    if let Some(dir) = &config.static_dir {
        let index = dir.join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(api::errors::panic_response)),
    );

    if config.cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
