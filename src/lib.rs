pub mod app;
pub mod charts;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod loader;
pub mod state;
pub mod stats;
pub mod table;
pub mod transforms;

pub use app::router;
pub use charts::ChartSpec;
pub use errors::DashboardError;
pub use loader::{load_table, resolve_data_path};
pub use state::AppState;
pub use stats::{country_stats, CountryStats};
pub use table::{ArrivalsTable, CountryRow, Metric};
pub use transforms::{filter_by_region, top_n_by_metric, transpose_years, YearIndexedView};
