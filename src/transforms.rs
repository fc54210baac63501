use crate::errors::DashboardError;
use crate::table::{ArrivalsTable, CountryRow, Metric, year_labels, ALL_REGIONS, YEAR_COUNT};
use std::cmp::Ordering;

/// The transposed table: one row per year, one column per country, with the
/// year label exposed as the ordinal axis for the line-chart builders.
#[derive(Debug, Clone, PartialEq)]
pub struct YearIndexedView {
    pub index: Vec<String>,
    /// Column order matches source row order.
    pub countries: Vec<String>,
    /// Year-major: `values[year_idx][country_idx]`.
    pub values: Vec<Vec<Option<f64>>>,
}

impl YearIndexedView {
    pub fn column(&self, country: &str) -> Option<usize> {
        self.countries.iter().position(|name| name == country)
    }

    pub fn series(&self, country: &str) -> Option<Vec<Option<f64>>> {
        let col = self.column(country)?;
        Some(self.values.iter().map(|year_row| year_row[col]).collect())
    }
}

/// The wildcard returns the full table; an unknown region returns an empty
/// table, not an error. Matching is exact and case-sensitive.
pub fn filter_by_region(table: &ArrivalsTable, region: &str) -> ArrivalsTable {
    if region == ALL_REGIONS {
        return table.clone();
    }
    ArrivalsTable::new(
        table
            .rows()
            .iter()
            .filter(|row| row.region == region)
            .cloned()
            .collect(),
    )
}

/// Stable sort on the metric, then truncate to `n`. Ties keep original row
/// order; rows with a missing metric sort last in either direction. `n`
/// larger than the row count returns all rows.
pub fn top_n_by_metric(
    table: &ArrivalsTable,
    n: usize,
    metric: Metric,
    descending: bool,
) -> Result<ArrivalsTable, DashboardError> {
    if n < 1 {
        return Err(DashboardError::InvalidRange {
            param: "n",
            value: n as i64,
        });
    }

    let mut rows: Vec<CountryRow> = table.rows().to_vec();
    rows.sort_by(|a, b| compare_metric(metric.value(a), metric.value(b), descending));
    rows.truncate(n);
    Ok(ArrivalsTable::new(rows))
}

fn compare_metric(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            if descending {
                y.total_cmp(&x)
            } else {
                x.total_cmp(&y)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Drop every non-year column except the country key and pivot so that rows
/// become years.
pub fn transpose_years(table: &ArrivalsTable) -> YearIndexedView {
    let countries = table.country_names();
    let values = (0..YEAR_COUNT)
        .map(|year_idx| table.rows().iter().map(|row| row.arrivals[year_idx]).collect())
        .collect();
    YearIndexedView {
        index: year_labels(),
        countries,
        values,
    }
}
