//! Configuration resolution and geometry
//!
//! Visible axes eat into the plot width, and the plot width drives the
//! horizontal scale. Styles are therefore fully resolved first, geometry is
//! derived from them, and only then are scales built.

use crate::{builder::SeriesSet, ChartDimensions, LineChartConfig};
use linevis_core::{SeriesName, SeriesStyle, Viewport, VisualSettings};

/// Per-series style after applying settings and global overrides
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub name: SeriesName,
    pub style: SeriesStyle,
    pub display_axis: bool,
    pub color: String,
    /// Opacity when nothing is highlighted
    pub base_opacity: f64,
}

/// Resolved styles in series render order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedStyles {
    entries: Vec<ResolvedStyle>,
}

impl ResolvedStyles {
    pub fn new(entries: Vec<ResolvedStyle>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Style for a plotted series.
    ///
    /// # Panics
    ///
    /// Styles are resolved from the same series set that is drawn, so a
    /// missing entry is a bug in the caller.
    pub fn get(&self, name: &SeriesName) -> &ResolvedStyle {
        self.entries
            .iter()
            .find(|s| &s.name == name)
            .unwrap_or_else(|| panic!("no resolved style for series `{}`", name))
    }

    pub fn visible_axis_count(&self) -> usize {
        self.entries.iter().filter(|s| s.display_axis).count()
    }
}

/// Base visibility: lines always show; point series follow `displayPoints`
pub fn base_opacity(style: SeriesStyle, display_points: bool) -> f64 {
    match style {
        SeriesStyle::Line => 1.0,
        SeriesStyle::Point if display_points => 1.0,
        SeriesStyle::Point => 0.0,
    }
}

/// Phase 1: resolve every series' style before any geometry is computed
pub fn resolve_styles(set: &SeriesSet, settings: &VisualSettings) -> ResolvedStyles {
    let entries = set
        .series
        .iter()
        .map(|series| {
            let style = settings.series_style(series.name.as_str());
            ResolvedStyle {
                name: series.name.clone(),
                style,
                display_axis: settings.effective_display_axis(series.name.as_str()),
                color: series.color.clone(),
                base_opacity: base_opacity(style, settings.display_points),
            }
        })
        .collect();

    ResolvedStyles::new(entries)
}

/// Phase 2: chart geometry with the right margin widened for visible axes
pub fn compute_geometry(viewport: Viewport, styles: &ResolvedStyles, config: &LineChartConfig) -> ChartDimensions {
    let margin = config
        .margin
        .with_axes(styles.visible_axis_count(), config.axis_spacing);

    ChartDimensions::new(viewport.width.max(0.0), viewport.height.max(0.0)).with_margin(margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use linevis_core::{Row, ScaleConfig, SeriesSettings};

    fn series_set() -> SeriesSet {
        let rows = vec![
            Row::new("2024-01-01", "A", 1.0),
            Row::new("2024-01-01", "B", 2.0),
            Row::new("2024-01-01", "C", 3.0),
        ];
        build(&rows, &mut |key: &str| format!("color-{key}"), &ScaleConfig::auto())
    }

    #[test]
    fn test_resolve_defaults() {
        let styles = resolve_styles(&series_set(), &VisualSettings::default());

        assert_eq!(styles.len(), 3);
        assert_eq!(styles.visible_axis_count(), 3);
        let a = styles.get(&"A".into());
        assert_eq!(a.style, SeriesStyle::Line);
        assert_eq!(a.color, "color-A");
        assert_eq!(a.base_opacity, 1.0);
    }

    #[test]
    fn test_point_base_opacity_follows_display_points() {
        let mut settings = VisualSettings::default();
        settings.series.insert(
            "B".into(),
            SeriesSettings {
                style: SeriesStyle::Point,
                ..SeriesSettings::default()
            },
        );
        settings.display_points = false;

        let styles = resolve_styles(&series_set(), &settings);
        assert_eq!(styles.get(&"A".into()).base_opacity, 1.0);
        assert_eq!(styles.get(&"B".into()).base_opacity, 0.0);

        settings.display_points = true;
        let styles = resolve_styles(&series_set(), &settings);
        assert_eq!(styles.get(&"B".into()).base_opacity, 1.0);
    }

    #[test]
    fn test_hide_all_axis_applies_before_geometry() {
        let mut settings = VisualSettings::default();
        settings.set_hide_all_axis(true);

        let config = LineChartConfig::default();
        let styles = resolve_styles(&series_set(), &settings);
        let dims = compute_geometry(Viewport::new(800.0, 400.0), &styles, &config);

        assert_eq!(styles.visible_axis_count(), 0);
        assert_eq!(dims.inner_width(), 750.0);
    }

    #[test]
    fn test_geometry_reserves_spacing_per_visible_axis() {
        let mut settings = VisualSettings::default();
        settings.series.insert(
            "C".into(),
            SeriesSettings {
                display_axis: false,
                ..SeriesSettings::default()
            },
        );

        let config = LineChartConfig::default();
        let styles = resolve_styles(&series_set(), &settings);
        let dims = compute_geometry(Viewport::new(800.0, 400.0), &styles, &config);

        assert_eq!(dims.margin.right, 80.0);
        assert_eq!(dims.inner_width(), 800.0 - 50.0 - 80.0);
    }

    #[test]
    #[should_panic(expected = "no resolved style")]
    fn test_missing_style_panics() {
        ResolvedStyles::default().get(&"Z".into());
    }
}
