//! # linevis-charts
//!
//! D3.js-style SVG line charting built with Leptos.
//! Every series gets its own vertical scale and, optionally, its own axis.
//!
//! ## Pipeline
//!
//! One render runs in strict phases, never interleaved:
//!
//! 1. `builder` - rows to series, one vertical scale domain per series
//! 2. `layout` - style resolution, then geometry (axis count reserves width)
//! 3. `scene` - horizontal scale, vertical ranges, drawable layers
//! 4. `line_chart` - Leptos SVG component over a `Scene`
//!
//! `hit_test` and `highlight` cover the interactive parts.

pub mod builder;
pub mod chartkit;
pub mod highlight;
pub mod hit_test;
pub mod layout;
pub mod line_chart;
pub mod scene;

pub use builder::*;
pub use chartkit::*;
pub use highlight::*;
pub use hit_test::*;
pub use layout::*;
pub use line_chart::*;
pub use scene::*;

// Re-export colors from linevis-core for convenience
pub use linevis_core::colors;

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Base margins before per-series axes are reserved on the right
    pub const fn standard() -> Self {
        Self::new(20.0, 0.0, 30.0, 50.0)
    }

    /// Widen the right margin to fit `axes` axes spaced `spacing` apart
    pub fn with_axes(mut self, axes: usize, spacing: f64) -> Self {
        self.right += axes as f64 * spacing;
        self
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::standard()
    }
}

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Inner width (excluding margins)
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Inner height (excluding margins)
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// SVG transform for inner chart area
    pub fn inner_transform(&self) -> String {
        format!("translate({}, {})", self.margin.left, self.margin.top)
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(800.0, 400.0)
    }
}

/// Line chart configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineChartConfig {
    pub margin: ChartMargin,
    /// Horizontal distance between consecutive per-series axes
    pub axis_spacing: f64,
    pub stroke_width: f64,
    pub point_radius: f64,
    /// Approximate pixels per x-axis tick
    pub x_tick_spacing: f64,
    pub y_tick_count: usize,
    pub tooltip_delay_ms: u32,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            margin: ChartMargin::standard(),
            axis_spacing: 40.0,
            stroke_width: 1.5,
            point_radius: 3.0,
            x_tick_spacing: 80.0,
            y_tick_count: 5,
            tooltip_delay_ms: 120,
        }
    }
}

impl LineChartConfig {
    pub fn axis_spacing(mut self, spacing: f64) -> Self {
        self.axis_spacing = spacing;
        self
    }

    pub fn margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    pub fn tooltip_delay(mut self, ms: u32) -> Self {
        self.tooltip_delay_ms = ms;
        self
    }

    pub fn point_radius(mut self, radius: f64) -> Self {
        self.point_radius = radius;
        self
    }
}
