use crate::table::ArrivalsTable;
use std::sync::Arc;

/// Shared handle to the loaded table. The table is never mutated, so chart
/// requests read it concurrently without a lock.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<ArrivalsTable>,
}

impl AppState {
    pub fn new(table: ArrivalsTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }
}
