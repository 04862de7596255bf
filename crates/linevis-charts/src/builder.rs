//! Series builder: raw rows to plottable series
//!
//! Rows with an unparseable timestamp or a non-finite value are dropped
//! silently; the [`FilterReport`] is the only trace they leave. Each series
//! gets its own vertical scale; only the domain is decided here, the pixel
//! range is applied once the layout knows the plot height.

use crate::chartkit::LinearScale;
use linevis_core::{
    CategoricalPalette, DataPoint, DataView, OverridePalette, Palette, Row, ScaleConfig,
    SeriesName, Timestamp, VisualSettings,
};
use std::collections::HashMap;

/// Outcome of the validity filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub kept: usize,
    pub dropped: usize,
}

/// A row that passed the validity filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRow<'a> {
    pub timestamp: Timestamp,
    pub value: f64,
    pub series: &'a SeriesName,
}

/// Validity filter: keep rows with a parseable timestamp and a finite value
pub fn filter_rows(rows: &[Row]) -> (Vec<ValidRow<'_>>, FilterReport) {
    let mut report = FilterReport::default();
    let mut valid = Vec::with_capacity(rows.len());

    for row in rows {
        match (row.timestamp(), row.finite_value()) {
            (Some(timestamp), Some(value)) => {
                report.kept += 1;
                valid.push(ValidRow {
                    timestamp,
                    value,
                    series: &row.series,
                });
            }
            _ => report.dropped += 1,
        }
    }

    (valid, report)
}

/// All points sharing a series name, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: SeriesName,
    pub color: String,
    pub points: Vec<DataPoint>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Observed (min, max) value
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        extent(self.points.iter().map(|p| p.value))
    }

    /// Observed (first, last) timestamp
    pub fn time_extent(&self) -> Option<(Timestamp, Timestamp)> {
        let min = self.points.iter().map(|p| p.timestamp).min()?;
        let max = self.points.iter().map(|p| p.timestamp).max()?;
        Some((min, max))
    }

    /// Points ordered by timestamp (stable for equal timestamps)
    pub fn sorted_points(&self) -> Vec<&DataPoint> {
        let mut points: Vec<&DataPoint> = self.points.iter().collect();
        points.sort_by_key(|p| p.timestamp);
        points
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}

/// Builder output: ordered series plus one vertical scale per series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    pub series: Vec<Series>,
    pub scales: HashMap<SeriesName, LinearScale>,
    pub report: FilterReport,
}

impl SeriesSet {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Series names in render order
    pub fn names(&self) -> Vec<SeriesName> {
        self.series.iter().map(|s| s.name.clone()).collect()
    }

    /// Vertical scale for a plotted series.
    ///
    /// # Panics
    ///
    /// Every series produced by [`build`] has a scale; a miss means the
    /// caller mixed outputs of different builds.
    pub fn scale(&self, name: &SeriesName) -> &LinearScale {
        self.scales
            .get(name)
            .unwrap_or_else(|| panic!("no vertical scale for series `{}`", name))
    }

    /// Timestamp extent over every series
    pub fn time_extent(&self) -> Option<(Timestamp, Timestamp)> {
        self.series
            .iter()
            .filter_map(Series::time_extent)
            .reduce(|(a_min, a_max), (b_min, b_max)| (a_min.min(b_min), a_max.max(b_max)))
    }

    /// Apply the pixel range `[height, 0]` to every vertical scale
    pub fn with_plot_height(mut self, height: f64) -> Self {
        for scale in self.scales.values_mut() {
            *scale = scale.clone().range(height, 0.0);
        }
        self
    }

    /// Build from a host data view, coloring with the settings' overrides on
    /// top of the categorical palette.
    pub fn from_view(view: &DataView, settings: &VisualSettings) -> Self {
        let rows = view.rows();
        let overrides = settings.color_overrides();
        let mut palette = OverridePalette::new(&overrides, CategoricalPalette::new());
        build(&rows, &mut palette, &settings.scale_config())
    }
}

/// Build series and per-series vertical scales from raw rows.
///
/// Series keep first-seen order. `palette` is consulted once per distinct
/// series name.
pub fn build<P: Palette>(rows: &[Row], palette: &mut P, config: &ScaleConfig) -> SeriesSet {
    let (valid, report) = filter_rows(rows);

    let mut series: Vec<Series> = Vec::new();
    let mut index: HashMap<&SeriesName, usize> = HashMap::new();

    for row in valid {
        let slot = match index.get(row.series) {
            Some(&slot) => slot,
            None => {
                let color = palette.color_for_key(row.series.as_str());
                series.push(Series {
                    name: row.series.clone(),
                    color,
                    points: Vec::new(),
                });
                index.insert(row.series, series.len() - 1);
                series.len() - 1
            }
        };

        let entry = &mut series[slot];
        entry.points.push(DataPoint::new(
            row.timestamp,
            row.value,
            entry.name.clone(),
            entry.color.clone(),
        ));
    }

    let scales = series
        .iter()
        .map(|s| {
            let (min, max) = if config.auto_scale {
                // Never empty: a series exists only once it has a point
                s.value_extent().unwrap_or((0.0, 0.0))
            } else {
                (config.fixed_min, config.fixed_max)
            };
            (s.name.clone(), LinearScale::new().domain(min, max))
        })
        .collect();

    tracing::debug!(
        kept = report.kept,
        dropped = report.dropped,
        series = series.len(),
        "Built series set"
    );

    SeriesSet {
        series,
        scales,
        report,
    }
}
