use crate::errors::DashboardError;
use crate::table::ArrivalsTable;
use serde::Serialize;

/// Summary-panel values for one country. Pass-through from the precomputed
/// derived columns; nothing is recomputed from the year columns here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryStats {
    pub country_name: String,
    pub average_10yr: Option<f64>,
    pub max_arrivals: Option<f64>,
    pub min_arrivals: Option<f64>,
}

pub fn country_stats(table: &ArrivalsTable, name: &str) -> Result<CountryStats, DashboardError> {
    let row = table
        .country(name)
        .ok_or_else(|| DashboardError::country_not_found(name))?;
    Ok(CountryStats {
        country_name: row.country_name.clone(),
        average_10yr: row.average_10yr,
        max_arrivals: row.max_arrivals,
        min_arrivals: row.min_arrivals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::fixtures::sample_table;

    #[test]
    fn stats_pass_stored_values_through_unchanged() {
        let table = sample_table();
        let stats = country_stats(&table, "Aruba").unwrap();
        // no rounding on the fractional average
        assert_eq!(stats.average_10yr, Some(1_082_000.5));
        assert_eq!(stats.max_arrivals, Some(1_951_000.0));
        assert_eq!(stats.min_arrivals, Some(206_000.0));
        assert_eq!(stats.country_name, "Aruba");
    }

    #[test]
    fn unknown_country_is_not_found() {
        let table = sample_table();
        let err = country_stats(&table, "Atlantis").unwrap_err();
        assert!(matches!(err, DashboardError::NotFound(_)));
    }
}
