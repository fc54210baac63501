use crate::charts::{self, ChartSpec};
use crate::errors::DashboardError;
use crate::export::csv_string;
use crate::state::AppState;
use crate::stats::{country_stats, CountryStats};
use crate::table::{ALL_REGIONS, FALLBACK_REGION, REGIONS};
use crate::transforms::transpose_years;
use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

/// UI cap on the top-N slider; the boundary clamps, the core accepts any
/// positive count.
const TOP_COUNTRIES_CAP: usize = 15;

#[derive(Debug, Deserialize)]
pub struct MapQuery {
    pub year: u16,
    pub region: String,
}

#[derive(Debug, Deserialize)]
pub struct TopCountriesQuery {
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct CountryQuery {
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub first: String,
    pub second: String,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub title: String,
    pub spec: ChartSpec,
}

#[derive(Debug, Serialize)]
pub struct TrendResponse {
    pub title: String,
    pub spec: ChartSpec,
    pub stats: CountryStats,
}

/// Validated option list for the region dropdown: wildcard first.
pub async fn regions() -> Json<Vec<String>> {
    let mut options = vec![ALL_REGIONS.to_string()];
    options.extend(REGIONS.iter().map(|region| region.to_string()));
    Json(options)
}

pub async fn countries(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.table.country_names())
}

pub async fn choropleth(
    State(state): State<AppState>,
    Query(query): Query<MapQuery>,
) -> Result<Json<ChartResponse>, DashboardError> {
    let spec = charts::choropleth(&state.table, query.year, &query.region)?;
    Ok(Json(ChartResponse {
        title: "International Tourist Arrivals per Country by Year and Region".to_string(),
        spec,
    }))
}

pub async fn tree_map(
    State(state): State<AppState>,
    Query(query): Query<MapQuery>,
) -> Result<Json<ChartResponse>, DashboardError> {
    // All regions at once is too many categories for one area chart; show the
    // fixed fallback region instead.
    let region = if query.region == ALL_REGIONS {
        FALLBACK_REGION
    } else {
        query.region.as_str()
    };
    let spec = charts::tree_map(&state.table, query.year, region)?;
    Ok(Json(ChartResponse {
        title: format!("Distribution of Arrivals in {region} in {}", query.year),
        spec,
    }))
}

pub async fn top_countries(
    State(state): State<AppState>,
    Query(query): Query<TopCountriesQuery>,
) -> Result<Json<ChartResponse>, DashboardError> {
    let count = query.count.min(TOP_COUNTRIES_CAP);
    let spec = charts::top_countries_bar(&state.table, count)?;
    Ok(Json(ChartResponse {
        title: format!("Top {count} countries for international tourist arrivals"),
        spec,
    }))
}

pub async fn country_trend(
    State(state): State<AppState>,
    Query(query): Query<CountryQuery>,
) -> Result<Json<TrendResponse>, DashboardError> {
    let view = transpose_years(&state.table);
    let spec = charts::country_line(&view, &query.country)?;
    let stats = country_stats(&state.table, &query.country)?;
    Ok(Json(TrendResponse {
        title: format!("Trends in tourist arrivals for {}", query.country),
        spec,
        stats,
    }))
}

pub async fn compare(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ChartResponse>, DashboardError> {
    let view = transpose_years(&state.table);
    let spec = charts::compare_lines(&view, &query.first, &query.second)?;
    Ok(Json(ChartResponse {
        title: format!(
            "Comparison in tourist arrival trends between {} and {}",
            query.first, query.second
        ),
        spec,
    }))
}

pub async fn stats(
    State(state): State<AppState>,
    Query(query): Query<CountryQuery>,
) -> Result<Json<CountryStats>, DashboardError> {
    Ok(Json(country_stats(&state.table, &query.country)?))
}

pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, DashboardError> {
    let body = csv_string(&state.table)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"Tourism arrivals.csv\"",
            ),
        ],
        body,
    ))
}
