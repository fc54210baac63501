use std::collections::HashMap;

pub const YEAR_MIN: u16 = 1995;
pub const YEAR_MAX: u16 = 2020;
pub const YEAR_COUNT: usize = (YEAR_MAX - YEAR_MIN + 1) as usize;

/// Wildcard dropdown value meaning "apply no region filter". Not a real region.
pub const ALL_REGIONS: &str = "All regions";

pub const REGIONS: [&str; 7] = [
    "East Asia & Pacific",
    "Europe & Central Asia",
    "Latin America & Caribbean",
    "Middle East & North Africa",
    "North America",
    "South Asia",
    "Sub-Saharan Africa",
];

/// Region substituted on the tree-map path when the wildcard is selected:
/// all regions on one area chart is too many categories to color distinctly.
pub const FALLBACK_REGION: &str = "Middle East & North Africa";

pub fn year_labels() -> Vec<String> {
    (YEAR_MIN..=YEAR_MAX).map(|year| year.to_string()).collect()
}

/// One row of the prepared arrivals dataset: one country/territory with its
/// per-year arrival counts and the precomputed summary columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRow {
    pub country_name: String,
    pub country_code: String,
    pub region: String,
    pub income_group: String,
    pub indicator_name: String,
    /// One slot per year 1995..=2020. `None` is "no data available" and must
    /// stay distinct from zero all the way to the chart specs.
    pub arrivals: Vec<Option<f64>>,
    pub average_10yr: Option<f64>,
    pub max_arrivals: Option<f64>,
    pub min_arrivals: Option<f64>,
    pub percent_drop_2019_2020: Option<f64>,
}

impl CountryRow {
    pub fn value(&self, year: u16) -> Option<f64> {
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return None;
        }
        self.arrivals[(year - YEAR_MIN) as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    TenYearAverage,
    MaxArrivals,
    MinArrivals,
    PercentDrop,
}

impl Metric {
    pub fn value(&self, row: &CountryRow) -> Option<f64> {
        match self {
            Metric::TenYearAverage => row.average_10yr,
            Metric::MaxArrivals => row.max_arrivals,
            Metric::MinArrivals => row.min_arrivals,
            Metric::PercentDrop => row.percent_drop_2019_2020,
        }
    }

    /// Column header in the prepared CSV.
    pub fn column_name(&self) -> &'static str {
        match self {
            Metric::TenYearAverage => "10-year Average in tourist arrivals",
            Metric::MaxArrivals => "Max number of arrivals",
            Metric::MinArrivals => "Minimum number of arrivals",
            Metric::PercentDrop => "Percent drop 2019 to 2020",
        }
    }
}

/// The loaded dataset. Never mutated after load; every derived view is a new
/// value, so shared references are safe across concurrent chart requests.
#[derive(Debug, Clone, Default)]
pub struct ArrivalsTable {
    rows: Vec<CountryRow>,
    by_name: HashMap<String, usize>,
}

impl ArrivalsTable {
    pub fn new(rows: Vec<CountryRow>) -> Self {
        let by_name = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (row.country_name.clone(), idx))
            .collect();
        Self { rows, by_name }
    }

    pub fn rows(&self) -> &[CountryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn country(&self, name: &str) -> Option<&CountryRow> {
        self.by_name.get(name).map(|&idx| &self.rows[idx])
    }

    pub fn country_names(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.country_name.clone()).collect()
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.rows.iter().any(|row| row.region == region)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn row(
        name: &str,
        code: &str,
        region: &str,
        arrivals: Vec<Option<f64>>,
        average_10yr: Option<f64>,
        max_arrivals: Option<f64>,
        min_arrivals: Option<f64>,
    ) -> CountryRow {
        assert_eq!(arrivals.len(), YEAR_COUNT);
        CountryRow {
            country_name: name.to_string(),
            country_code: code.to_string(),
            region: region.to_string(),
            income_group: "High income".to_string(),
            indicator_name: "International tourism, number of arrivals".to_string(),
            arrivals,
            average_10yr,
            max_arrivals,
            min_arrivals,
            percent_drop_2019_2020: Some(-70.0),
        }
    }

    fn series(base: f64, step: f64) -> Vec<Option<f64>> {
        (0..YEAR_COUNT)
            .map(|idx| Some(base + step * idx as f64))
            .collect()
    }

    /// Five-row table: four named regions, one blank-region aggregate, and
    /// one country (France) with a missing 2020 value.
    pub(crate) fn sample_table() -> ArrivalsTable {
        let mut france = series(60_000_000.0, 500_000.0);
        france[YEAR_COUNT - 1] = None;

        let mut aruba = series(206_000.0, 50_000.0);
        aruba[3] = None;

        ArrivalsTable::new(vec![
            row(
                "Aruba",
                "ABW",
                "Latin America & Caribbean",
                aruba,
                Some(1_082_000.5),
                Some(1_951_000.0),
                Some(206_000.0),
            ),
            row(
                "France",
                "FRA",
                "Europe & Central Asia",
                france,
                Some(84_000_000.25),
                Some(90_900_000.0),
                Some(60_000_000.0),
            ),
            row(
                "Japan",
                "JPN",
                "East Asia & Pacific",
                series(3_300_000.0, 900_000.0),
                Some(19_000_000.0),
                Some(31_900_000.0),
                Some(3_300_000.0),
            ),
            row(
                "Egypt, Arab Rep.",
                "EGY",
                "Middle East & North Africa",
                series(2_800_000.0, 300_000.0),
                Some(9_100_000.0),
                Some(14_700_000.0),
                Some(2_800_000.0),
            ),
            row(
                "World",
                "WLD",
                "",
                series(530_000_000.0, 20_000_000.0),
                Some(1_300_000_000.0),
                Some(1_500_000_000.0),
                Some(530_000_000.0),
            ),
        ])
    }

}
