pub mod api;
pub mod config;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::SorterConfig;
use crate::services::sorter_service::SorterService;
use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::sorter::index,
        api::handlers::sorter::upload_folder,
        api::handlers::sorter::clear_folders,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::sorter::UploadReportResponse,
            api::handlers::health::HealthResponse,
            config::SortVariant,
            config::CollisionPolicy,
            services::category::Category,
            services::year::YearBucket,
        )
    ),
    tags(
        (name = "sorter", description = "Folder upload and sorting endpoints"),
        (name = "system", description = "Service status")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub sorter: Arc<SorterService>,
    pub config: SorterConfig,
}

pub fn create_app(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(api::handlers::sorter::index))
        .route("/health", get(api::handlers::health::health_check))
        .route("/upload-folder", post(api::handlers::sorter::upload_folder))
        .route("/clear-folders", post(api::handlers::sorter::clear_folders))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(
            state.config.max_upload_size,
        ))
        .with_state(state)
}
