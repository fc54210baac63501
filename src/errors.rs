use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Source dataset missing or malformed at load time. Fails hard, no retry.
    #[error("dataset unavailable: {0}")]
    DataUnavailable(String),

    /// A country or region string that required an exact match did not match.
    #[error("{0} not found")]
    NotFound(String),

    /// Non-positive or out-of-domain scalar parameter (top-N count, year).
    #[error("{param} out of range: {value}")]
    InvalidRange { param: &'static str, value: i64 },
}

impl DashboardError {
    pub fn country_not_found(name: &str) -> Self {
        Self::NotFound(format!("country {name:?}"))
    }

    pub fn region_not_found(name: &str) -> Self {
        Self::NotFound(format!("region {name:?}"))
    }
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        Self::DataUnavailable(err.to_string())
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::DataUnavailable(err.to_string())
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
        };
        if status.is_server_error() {
            error!("{self}");
        }
        (status, self.to_string()).into_response()
    }
}
