use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::nlu::SentimentAnalyzer;
use crate::config::Config;
use crate::state::SharedState;

mod catalog;
mod dealers;
mod error;
mod observability;
mod reviews;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use crate::services::{CatalogService, DealerDirectory, ReviewService};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<Config> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn dealers(&self) -> &Arc<DealerDirectory> {
        &self.shared.dealers
    }

    #[must_use]
    pub fn reviews(&self) -> &Arc<ReviewService> {
        &self.shared.reviews
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<dyn CatalogService> {
        &self.shared.catalog
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// Builds app state around a caller-supplied sentiment analyzer.
pub async fn create_app_state_with_sentiment(
    config: Config,
    sentiment: Arc<dyn SentimentAnalyzer>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::with_sentiment(config, sentiment).await?);
    Ok(create_app_state(shared, None))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let api_router = create_api_router().with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::track_metrics))
}

fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dealers", get(dealers::list_dealers))
        .route("/dealers/{id}", get(dealers::get_dealer))
        .route(
            "/dealers/{id}/reviews",
            get(reviews::list_reviews).post(reviews::post_review),
        )
        .route(
            "/makes",
            get(catalog::list_makes).post(catalog::create_make),
        )
        .route(
            "/makes/{id}",
            get(catalog::get_make)
                .put(catalog::update_make)
                .delete(catalog::delete_make),
        )
        .route(
            "/models",
            get(catalog::list_models).post(catalog::create_model),
        )
        .route(
            "/models/{id}",
            get(catalog::get_model)
                .put(catalog::update_model)
                .delete(catalog::delete_model),
        )
        .route("/catalog/years", get(catalog::list_years))
        .route("/catalog/body-types", get(catalog::list_body_types))
        .route("/system/health/live", get(system::health_live))
        .route("/system/health/ready", get(system::health_ready))
        .route("/metrics", get(observability::get_metrics))
}
