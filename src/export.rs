use crate::errors::DashboardError;
use crate::table::{ArrivalsTable, CountryRow, Metric, YEAR_MAX, YEAR_MIN};
use std::io::Write;

/// The full table as two-dimensional sheet rows, header first, keyed by the
/// country name in the leading column. Missing cells serialize as empty
/// strings so "no data" never turns into a zero in the exported file.
pub fn sheet_rows(table: &ArrivalsTable) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(table.len() + 1);
    rows.push(header_row());
    rows.extend(table.rows().iter().map(data_row));
    rows
}

pub fn write_csv<W: Write>(table: &ArrivalsTable, writer: W) -> Result<(), DashboardError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in sheet_rows(table) {
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn csv_string(table: &ArrivalsTable) -> Result<String, DashboardError> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|err| DashboardError::DataUnavailable(format!("export produced invalid utf-8: {err}")))
}

fn header_row() -> Vec<String> {
    let mut columns = vec![
        "Country Name".to_string(),
        "Country Code".to_string(),
        "Region".to_string(),
        "IncomeGroup".to_string(),
        "Indicator Name".to_string(),
    ];
    columns.extend((YEAR_MIN..=YEAR_MAX).map(|year| year.to_string()));
    columns.extend(
        [
            Metric::TenYearAverage,
            Metric::MaxArrivals,
            Metric::MinArrivals,
            Metric::PercentDrop,
        ]
        .map(|metric| metric.column_name().to_string()),
    );
    columns
}

fn data_row(row: &CountryRow) -> Vec<String> {
    let mut cells = vec![
        row.country_name.clone(),
        row.country_code.clone(),
        row.region.clone(),
        row.income_group.clone(),
        row.indicator_name.clone(),
    ];
    cells.extend(row.arrivals.iter().map(|value| cell(*value)));
    cells.extend(
        [
            row.average_10yr,
            row.max_arrivals,
            row.min_arrivals,
            row.percent_drop_2019_2020,
        ]
        .map(cell),
    );
    cells
}

fn cell(value: Option<f64>) -> String {
    value.map(|number| number.to_string()).unwrap_or_default()
}
