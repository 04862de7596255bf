//! Scene composition
//!
//! A [`Scene`] is everything the SVG component draws, computed up front from
//! the series set, resolved styles, geometry and highlight. Composition is
//! pure: the same inputs always give the same scene.

use crate::{
    builder::SeriesSet,
    chartkit::{axis_domain_path, format_time, line_path, LinearScale, Scale, TimeScale},
    highlight::{series_opacity, Highlight},
    hit_test::{hover_at, Hover, PlottedPoint},
    layout::{compute_geometry, resolve_styles, ResolvedStyles},
    ChartDimensions, LineChartConfig,
};
use linevis_core::{
    CompactNumberFormatter, SeriesName, SeriesStyle, ValueFormatter, Viewport, VisualSettings,
};

/// Length of the outer ticks at both ends of a vertical axis
const OUTER_TICK: f64 = 6.0;

/// Tick position along an axis plus its label
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

/// One drawable series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLayer {
    pub name: SeriesName,
    pub color: String,
    pub style: SeriesStyle,
    pub opacity: f64,
    /// SVG path for line series
    pub path: Option<String>,
    /// Circle centers for point series
    pub markers: Vec<(f64, f64)>,
}

/// Vertical axis belonging to one series, to the right of the plot
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayer {
    pub name: SeriesName,
    pub color: String,
    pub offset_x: f64,
    pub ticks: Vec<AxisTick>,
    pub domain_path: String,
}

/// Fully composed chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub dims: ChartDimensions,
    pub x_scale: Option<TimeScale>,
    pub x_ticks: Vec<AxisTick>,
    pub layers: Vec<SeriesLayer>,
    pub axes: Vec<AxisLayer>,
    /// Points of visible layers with their plot-area position, for hit testing
    pub points: Vec<PlottedPoint>,
    pub stroke_width: f64,
    pub point_radius: f64,
}

impl Scene {
    /// Run every phase: resolve styles, compute geometry, then compose
    pub fn render(
        set: &SeriesSet,
        settings: &VisualSettings,
        viewport: Viewport,
        config: &LineChartConfig,
        highlight: &Highlight,
    ) -> Self {
        let styles = resolve_styles(set, settings);
        let dims = compute_geometry(viewport, &styles, config);
        Self::compose(set, &styles, dims, config, highlight)
    }

    /// Build scales and drawable layers.
    ///
    /// # Panics
    ///
    /// Panics if `styles` has no entry for a series in `set`.
    pub fn compose(
        set: &SeriesSet,
        styles: &ResolvedStyles,
        dims: ChartDimensions,
        config: &LineChartConfig,
        highlight: &Highlight,
    ) -> Self {
        let mut scene = Self {
            dims,
            stroke_width: config.stroke_width,
            point_radius: config.point_radius,
            ..Self::default()
        };

        let Some((t_min, t_max)) = set.time_extent() else {
            return scene;
        };

        let plot_width = dims.inner_width();
        let plot_height = dims.inner_height();

        let x_scale = TimeScale::new().domain(t_min, t_max).range(0.0, plot_width);
        let tick_count = ((plot_width / config.x_tick_spacing).floor() as usize).max(2);
        let interval = x_scale.tick_interval(tick_count);
        scene.x_ticks = x_scale
            .ticks(tick_count)
            .into_iter()
            .map(|t| AxisTick {
                position: x_scale.scale(t),
                label: format_time(t, interval),
            })
            .collect();

        let formatter = CompactNumberFormatter;
        let mut axis_index = 0;

        for series in &set.series {
            let style = styles.get(&series.name);
            let y_scale = set.scale(&series.name).clone().range(plot_height, 0.0);

            let plotted: Vec<PlottedPoint> = series
                .sorted_points()
                .into_iter()
                .map(|p| PlottedPoint {
                    x: x_scale.scale(p.timestamp),
                    y: y_scale.scale(p.value),
                    point: p.clone(),
                })
                .collect();

            let (path, markers) = match style.style {
                SeriesStyle::Line => {
                    let coords: Vec<(f64, f64)> = plotted.iter().map(|p| (p.x, p.y)).collect();
                    (Some(line_path(&coords)), Vec::new())
                }
                SeriesStyle::Point => (None, plotted.iter().map(|p| (p.x, p.y)).collect()),
            };

            let opacity = series_opacity(style, highlight);
            scene.layers.push(SeriesLayer {
                name: series.name.clone(),
                color: style.color.clone(),
                style: style.style,
                opacity,
                path,
                markers,
            });

            if style.display_axis {
                scene.axes.push(AxisLayer {
                    name: series.name.clone(),
                    color: style.color.clone(),
                    offset_x: plot_width + axis_index as f64 * config.axis_spacing,
                    ticks: axis_ticks(&y_scale, config.y_tick_count, &formatter),
                    domain_path: axis_domain_path(plot_height, OUTER_TICK),
                });
                axis_index += 1;
            }

            // Invisible layers are not hit-testable
            if opacity > 0.0 {
                scene.points.extend(plotted);
            }
        }

        scene.x_scale = Some(x_scale);
        scene
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Nearest-point lookup for a pointer at `plot_x` inside the plot area
    pub fn hover_at(&self, plot_x: f64) -> Option<Hover> {
        let x_scale = self.x_scale.as_ref()?;
        let plot_x = plot_x.clamp(0.0, self.dims.inner_width());
        Some(hover_at(&self.points, x_scale, plot_x))
    }

    /// Layer for a series, if plotted
    pub fn layer(&self, name: &SeriesName) -> Option<&SeriesLayer> {
        self.layers.iter().find(|l| &l.name == name)
    }
}

fn axis_ticks(scale: &LinearScale, count: usize, formatter: &impl ValueFormatter) -> Vec<AxisTick> {
    scale
        .nice_ticks(count)
        .into_iter()
        .map(|v| AxisTick {
            position: scale.scale(v),
            label: formatter.format(v),
        })
        .collect()
}
