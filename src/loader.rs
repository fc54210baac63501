use crate::errors::DashboardError;
use crate::table::{ArrivalsTable, CountryRow, YEAR_MAX, YEAR_MIN};
use std::collections::HashSet;
use std::{env, path::Path, path::PathBuf};

const COUNTRY_NAME: &str = "Country Name";
const COUNTRY_CODE: &str = "Country Code";
const REGION: &str = "Region";
const INCOME_GROUP: &str = "IncomeGroup";
const INDICATOR_NAME: &str = "Indicator Name";
const AVERAGE_10YR: &str = "10-year Average in tourist arrivals";
const MAX_ARRIVALS: &str = "Max number of arrivals";
const MIN_ARRIVALS: &str = "Minimum number of arrivals";
const PERCENT_DROP: &str = "Percent drop 2019 to 2020";

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("ARRIVALS_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/Tourism_arrivals_prepared.csv")
}

/// Load the prepared arrivals CSV into an immutable in-memory table.
///
/// Fails with `DataUnavailable` on a missing file, a missing column, a
/// non-numeric year cell, a blank or duplicated country name, or a file with
/// no data rows. Never falls back to an empty table.
pub fn load_table(path: &Path) -> Result<ArrivalsTable, DashboardError> {
    let mut reader = csv::Reader::from_path(path).map_err(|err| {
        DashboardError::DataUnavailable(format!("failed to open {}: {err}", path.display()))
    })?;
    let headers = reader.headers()?.clone();

    let name_col = column_index(&headers, COUNTRY_NAME)?;
    let code_col = column_index(&headers, COUNTRY_CODE)?;
    let region_col = column_index(&headers, REGION)?;
    let income_col = column_index(&headers, INCOME_GROUP)?;
    let indicator_col = column_index(&headers, INDICATOR_NAME)?;
    let average_col = column_index(&headers, AVERAGE_10YR)?;
    let max_col = column_index(&headers, MAX_ARRIVALS)?;
    let min_col = column_index(&headers, MIN_ARRIVALS)?;
    let drop_col = column_index(&headers, PERCENT_DROP)?;
    let year_cols = (YEAR_MIN..=YEAR_MAX)
        .map(|year| column_index(&headers, &year.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    for record in reader.records() {
        let record = record?;
        let cell = |col: usize| record.get(col).unwrap_or("").trim();

        let country_name = cell(name_col).to_string();
        if country_name.is_empty() {
            return Err(DashboardError::DataUnavailable(format!(
                "blank country name in row {}",
                rows.len() + 1
            )));
        }
        if !seen.insert(country_name.clone()) {
            return Err(DashboardError::DataUnavailable(format!(
                "duplicate country name {country_name:?}"
            )));
        }

        let arrivals = year_cols
            .iter()
            .enumerate()
            .map(|(idx, &col)| {
                parse_cell(cell(col), &(YEAR_MIN + idx as u16).to_string(), &country_name)
            })
            .collect::<Result<Vec<_>, _>>()?;

        rows.push(CountryRow {
            country_code: cell(code_col).to_string(),
            region: cell(region_col).to_string(),
            income_group: cell(income_col).to_string(),
            indicator_name: cell(indicator_col).to_string(),
            arrivals,
            average_10yr: parse_cell(cell(average_col), AVERAGE_10YR, &country_name)?,
            max_arrivals: parse_cell(cell(max_col), MAX_ARRIVALS, &country_name)?,
            min_arrivals: parse_cell(cell(min_col), MIN_ARRIVALS, &country_name)?,
            percent_drop_2019_2020: parse_cell(cell(drop_col), PERCENT_DROP, &country_name)?,
            country_name,
        });
    }

    if rows.is_empty() {
        return Err(DashboardError::DataUnavailable(format!(
            "no data rows in {}",
            path.display()
        )));
    }

    Ok(ArrivalsTable::new(rows))
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, DashboardError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| DashboardError::DataUnavailable(format!("missing column {name:?}")))
}

/// Empty cells are valid and mean "no data available", distinct from zero.
fn parse_cell(raw: &str, column: &str, country: &str) -> Result<Option<f64>, DashboardError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| {
        DashboardError::DataUnavailable(format!(
            "non-numeric value {raw:?} in column {column:?} for {country}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::YEAR_COUNT;

    fn header_line() -> String {
        let mut columns = vec![
            COUNTRY_NAME.to_string(),
            COUNTRY_CODE.to_string(),
            REGION.to_string(),
            INCOME_GROUP.to_string(),
            INDICATOR_NAME.to_string(),
        ];
        columns.extend((YEAR_MIN..=YEAR_MAX).map(|year| year.to_string()));
        columns.extend([
            AVERAGE_10YR.to_string(),
            MAX_ARRIVALS.to_string(),
            MIN_ARRIVALS.to_string(),
            PERCENT_DROP.to_string(),
        ]);
        columns.join(",")
    }

    fn data_line(name: &str, code: &str, region: &str, base: f64, blank_last_year: bool) -> String {
        let mut cells = vec![
            format!("\"{name}\""),
            code.to_string(),
            format!("\"{region}\""),
            "High income".to_string(),
            "\"International tourism, number of arrivals\"".to_string(),
        ];
        for idx in 0..YEAR_COUNT {
            if blank_last_year && idx == YEAR_COUNT - 1 {
                cells.push(String::new());
            } else {
                cells.push((base + 1000.0 * idx as f64).to_string());
            }
        }
        cells.extend([
            (base + 12500.5).to_string(),
            (base + 25000.0).to_string(),
            base.to_string(),
            "-70.5".to_string(),
        ]);
        cells.join(",")
    }

    fn write_fixture(contents: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("arrivals_loader_{}_{}.csv", std::process::id(), nanos));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_prepared_csv() {
        let contents = format!(
            "{}\n{}\n{}\n",
            header_line(),
            data_line("Aruba", "ABW", "Latin America & Caribbean", 206_000.0, false),
            data_line("France", "FRA", "Europe & Central Asia", 60_000_000.0, true),
        );
        let path = write_fixture(&contents);
        let table = load_table(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(table.len(), 2);
        let aruba = table.country("Aruba").unwrap();
        assert_eq!(aruba.country_code, "ABW");
        assert_eq!(aruba.region, "Latin America & Caribbean");
        assert_eq!(aruba.value(1995), Some(206_000.0));
        assert_eq!(aruba.value(2020), Some(206_000.0 + 1000.0 * 25.0));
        assert_eq!(aruba.average_10yr, Some(218_500.5));

        // blank cell is missing data, not zero
        let france = table.country("France").unwrap();
        assert_eq!(france.value(2020), None);
        assert_eq!(france.value(2019), Some(60_000_000.0 + 1000.0 * 24.0));
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let err = load_table(Path::new("/nonexistent/arrivals.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::DataUnavailable(_)));
    }

    #[test]
    fn missing_year_column_is_data_unavailable() {
        let contents = format!(
            "{}\n{}\n",
            header_line().replace("2007,", ""),
            data_line("Aruba", "ABW", "Latin America & Caribbean", 206_000.0, false),
        );
        let path = write_fixture(&contents);
        let err = load_table(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, DashboardError::DataUnavailable(_)));
    }

    #[test]
    fn non_numeric_cell_is_data_unavailable() {
        let line = data_line("Aruba", "ABW", "Latin America & Caribbean", 206_000.0, false)
            .replace("206000,", "n/a,");
        let contents = format!("{}\n{}\n", header_line(), line);
        let path = write_fixture(&contents);
        let err = load_table(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, DashboardError::DataUnavailable(_)));
    }

    #[test]
    fn duplicate_country_is_data_unavailable() {
        let contents = format!(
            "{}\n{}\n{}\n",
            header_line(),
            data_line("Aruba", "ABW", "Latin America & Caribbean", 206_000.0, false),
            data_line("Aruba", "ABW", "Latin America & Caribbean", 206_000.0, false),
        );
        let path = write_fixture(&contents);
        let err = load_table(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, DashboardError::DataUnavailable(_)));
    }

    #[test]
    fn header_only_file_is_data_unavailable() {
        let contents = format!("{}\n", header_line());
        let path = write_fixture(&contents);
        let err = load_table(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, DashboardError::DataUnavailable(_)));
    }
}
