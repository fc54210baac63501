use crate::errors::DashboardError;
use crate::table::{ArrivalsTable, Metric, ALL_REGIONS, YEAR_MAX, YEAR_MIN};
use crate::transforms::{filter_by_region, top_n_by_metric, YearIndexedView};
use serde::Serialize;

/// Fixed 3-stop gradient from dark to light blue, matching the dashboard theme.
pub const COLOR_SCALE: [(f64, &str); 3] =
    [(0.0, "#003366"), (0.5, "#007bff"), (1.0, "#87ceeb")];

/// Swatch shown in the choropleth legend for countries with no data.
pub const MISSING_DATA_COLOR: &str = "#E5ECF6";
pub const MISSING_DATA_LABEL: &str = "Unavailable Data";

pub const PRIMARY_BLUE: &str = "#007bff";
pub const BAR_BLUE: &str = "#007bfa";
pub const COMPARE_COLORS: [&str; 2] = ["blue", "green"];

/// Business rule tied to this calendar year, not a generic outlier detector.
pub const PANDEMIC_YEAR: u16 = 2020;
pub const PANDEMIC_LABEL: &str = "Covid-19 Year";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Choropleth,
    TreeMap,
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    pub show_ticks: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingDataLegend {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    /// Year label on the ordinal axis the annotation anchors to.
    pub x: String,
    pub y: f64,
    pub show_arrow: bool,
}

/// One data series. `values` keeps `None` for missing data so renderers can
/// show "no data" distinctly from zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub labels: Vec<String>,
    /// ISO3 codes for geographic traces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,
    pub values: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub markers: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_text: Option<Vec<String>>,
}

impl Trace {
    fn new(labels: Vec<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: None,
            labels,
            locations: None,
            values,
            color: None,
            markers: false,
            hover_text: None,
        }
    }
}

/// Library-agnostic chart description: the output contract of every builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub traces: Vec<Trace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale: Option<Vec<ColorStop>>,
    /// Observed [min, max] pinning the color gradient to the filtered rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_data_legend: Option<MissingDataLegend>,
    pub annotations: Vec<Annotation>,
}

impl ChartSpec {
    fn new(kind: ChartKind, traces: Vec<Trace>) -> Self {
        Self {
            kind,
            traces,
            x_axis: None,
            y_axis: None,
            color_scale: None,
            color_range: None,
            missing_data_legend: None,
            annotations: Vec::new(),
        }
    }
}

fn blue_scale() -> Vec<ColorStop> {
    COLOR_SCALE
        .iter()
        .map(|&(position, color)| ColorStop {
            position,
            color: color.to_string(),
        })
        .collect()
}

fn validate_year(year: u16) -> Result<(), DashboardError> {
    if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
        return Err(DashboardError::InvalidRange {
            param: "year",
            value: year as i64,
        });
    }
    Ok(())
}

/// The builders are the trust boundary: an unknown region or country must
/// fail rather than produce an empty chart silently.
fn validate_region(table: &ArrivalsTable, region: &str) -> Result<(), DashboardError> {
    if region == ALL_REGIONS || table.has_region(region) {
        return Ok(());
    }
    Err(DashboardError::region_not_found(region))
}

/// One value per country for the selected year on a geographic projection.
pub fn choropleth(
    table: &ArrivalsTable,
    year: u16,
    region: &str,
) -> Result<ChartSpec, DashboardError> {
    validate_year(year)?;
    validate_region(table, region)?;

    let filtered = filter_by_region(table, region);
    let labels = filtered.country_names();
    let locations = filtered
        .rows()
        .iter()
        .map(|row| row.country_code.clone())
        .collect();
    let values: Vec<Option<f64>> = filtered.rows().iter().map(|row| row.value(year)).collect();
    let color_range = observed_range(&values);

    let mut trace = Trace::new(labels, values);
    trace.locations = Some(locations);

    let mut spec = ChartSpec::new(ChartKind::Choropleth, vec![trace]);
    spec.color_scale = Some(blue_scale());
    spec.color_range = color_range;
    spec.missing_data_legend = Some(MissingDataLegend {
        label: MISSING_DATA_LABEL.to_string(),
        color: MISSING_DATA_COLOR.to_string(),
    });
    Ok(spec)
}

/// One leaf per country; area and color both carry the year value. Rows are
/// sorted ascending by value first so the layout is deterministic. Leaves
/// with missing values are omitted: an area encoding cannot show "no data".
pub fn tree_map(
    table: &ArrivalsTable,
    year: u16,
    region: &str,
) -> Result<ChartSpec, DashboardError> {
    validate_year(year)?;
    validate_region(table, region)?;

    let filtered = filter_by_region(table, region);
    let mut leaves: Vec<(String, f64)> = filtered
        .rows()
        .iter()
        .filter_map(|row| row.value(year).map(|value| (row.country_name.clone(), value)))
        .collect();
    leaves.sort_by(|a, b| a.1.total_cmp(&b.1));

    let hover_text = leaves
        .iter()
        .map(|(name, value)| format!("{name}: Total arrivals: {value:.2}"))
        .collect();
    let labels = leaves.iter().map(|(name, _)| name.clone()).collect();
    let values = leaves.into_iter().map(|(_, value)| Some(value)).collect();

    let mut trace = Trace::new(labels, values);
    trace.hover_text = Some(hover_text);

    let mut spec = ChartSpec::new(ChartKind::TreeMap, vec![trace]);
    spec.color_scale = Some(blue_scale());
    Ok(spec)
}

/// Bars for the top `n` countries by 10-year average, descending. Country
/// names label the x axis with tick marks suppressed.
pub fn top_countries_bar(table: &ArrivalsTable, n: usize) -> Result<ChartSpec, DashboardError> {
    let top = top_n_by_metric(table, n, Metric::TenYearAverage, true)?;
    let labels = top.country_names();
    let values = top.rows().iter().map(|row| row.average_10yr).collect();

    let mut trace = Trace::new(labels, values);
    trace.color = Some(BAR_BLUE.to_string());

    let mut spec = ChartSpec::new(ChartKind::Bar, vec![trace]);
    spec.x_axis = Some(Axis {
        title: String::new(),
        show_ticks: false,
    });
    spec.y_axis = Some(Axis {
        title: "10-year Average in arrivals".to_string(),
        show_ticks: true,
    });
    Ok(spec)
}

/// Year-vs-arrivals line for one country, markers on every point, with the
/// pandemic annotation when (and only when) the 2020 value is present.
pub fn country_line(view: &YearIndexedView, country: &str) -> Result<ChartSpec, DashboardError> {
    let values = view
        .series(country)
        .ok_or_else(|| DashboardError::country_not_found(country))?;

    let mut annotations = Vec::new();
    let pandemic_label = PANDEMIC_YEAR.to_string();
    if let Some(pos) = view.index.iter().position(|label| *label == pandemic_label) {
        if let Some(value) = values[pos] {
            annotations.push(Annotation {
                text: PANDEMIC_LABEL.to_string(),
                x: pandemic_label,
                y: value,
                show_arrow: true,
            });
        }
    }

    let mut trace = Trace::new(view.index.clone(), values);
    trace.color = Some(PRIMARY_BLUE.to_string());
    trace.markers = true;

    let mut spec = ChartSpec::new(ChartKind::Line, vec![trace]);
    spec.x_axis = Some(Axis {
        title: "Year".to_string(),
        show_ticks: true,
    });
    spec.y_axis = Some(Axis {
        title: "Number of Arrivals".to_string(),
        show_ticks: true,
    });
    spec.annotations = annotations;
    Ok(spec)
}

/// Two overlaid line series for two independently selected countries, in two
/// fixed, distinguishable colors.
pub fn compare_lines(
    view: &YearIndexedView,
    first: &str,
    second: &str,
) -> Result<ChartSpec, DashboardError> {
    let traces = [first, second]
        .into_iter()
        .zip(COMPARE_COLORS)
        .map(|(country, color)| {
            let values = view
                .series(country)
                .ok_or_else(|| DashboardError::country_not_found(country))?;
            let mut trace = Trace::new(view.index.clone(), values);
            trace.name = Some(country.to_string());
            trace.color = Some(color.to_string());
            Ok(trace)
        })
        .collect::<Result<Vec<_>, DashboardError>>()?;

    let mut spec = ChartSpec::new(ChartKind::Line, traces);
    spec.x_axis = Some(Axis {
        title: "Year".to_string(),
        show_ticks: true,
    });
    spec.y_axis = Some(Axis {
        title: "Number of Arrivals".to_string(),
        show_ticks: true,
    });
    Ok(spec)
}

fn observed_range(values: &[Option<f64>]) -> Option<[f64; 2]> {
    let present: Vec<f64> = values.iter().filter_map(|value| *value).collect();
    let min = present.iter().copied().reduce(f64::min)?;
    let max = present.iter().copied().reduce(f64::max)?;
    Some([min, max])
}
