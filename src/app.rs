use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/regions", get(handlers::regions))
        .route("/api/countries", get(handlers::countries))
        .route("/api/charts/choropleth", get(handlers::choropleth))
        .route("/api/charts/treemap", get(handlers::tree_map))
        .route("/api/charts/top-countries", get(handlers::top_countries))
        .route("/api/charts/country-trend", get(handlers::country_trend))
        .route("/api/charts/compare", get(handlers::compare))
        .route("/api/stats", get(handlers::stats))
        .route("/api/export", get(handlers::export))
        .with_state(state)
}
