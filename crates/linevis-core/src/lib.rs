//! # linevis-core
//!
//! Core domain types for the linevis multi-axis line chart visual.
//! Implements Strategy pattern for value formatting and color assignment.

pub mod dataview;
pub mod formatting;
pub mod palette;
pub mod settings;

pub use dataview::*;
pub use formatting::*;
pub use palette::*;
pub use settings::*;

use serde::{Deserialize, Serialize};

/// Unix timestamp in milliseconds
pub type Timestamp = i64;

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for value formatting (axis ticks, tooltips)
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Fixed-decimal formatter, used for tooltip values
#[derive(Debug, Clone)]
pub struct DecimalFormatter {
    pub decimals: usize,
}

impl Default for DecimalFormatter {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl ValueFormatter for DecimalFormatter {
    fn format(&self, value: f64) -> String {
        if value.abs() >= 10_000.0 {
            format!("{:.0}", value)
        } else {
            format!("{:.prec$}", value, prec = self.decimals)
        }
    }
}

/// Compact formatter for large numbers (K, M, B suffixes)
#[derive(Debug, Clone, Default)]
pub struct CompactNumberFormatter;

impl ValueFormatter for CompactNumberFormatter {
    fn format(&self, num: f64) -> String {
        let abs = num.abs();
        let sign = if num < 0.0 { "-" } else { "" };

        if abs >= 1_000_000_000.0 {
            format!("{}{:.1}B", sign, abs / 1_000_000_000.0)
        } else if abs >= 1_000_000.0 {
            format!("{}{:.1}M", sign, abs / 1_000_000.0)
        } else if abs >= 10_000.0 {
            format!("{}{:.0}K", sign, abs / 1_000.0)
        } else if abs >= 1_000.0 {
            format!("{}{:.1}K", sign, abs / 1_000.0)
        } else {
            let text = if abs >= 1.0 {
                format!("{:.2}", abs)
            } else {
                format!("{:.3}", abs)
            };
            // "50" rather than "50.00"
            let text = text.trim_end_matches('0').trim_end_matches('.');
            format!("{}{}", sign, text)
        }
    }
}

// ============================================================================
// CORE VALUE TYPES
// ============================================================================

/// Series (legend group) identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesName(pub String);

impl SeriesName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SeriesName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SeriesName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SeriesName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::borrow::Borrow<str> for SeriesName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Single plotted observation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub timestamp: Timestamp,
    pub value: f64,
    pub series_name: SeriesName,
    pub color: String,
}

impl DataPoint {
    pub fn new(timestamp: Timestamp, value: f64, series_name: SeriesName, color: String) -> Self {
        Self {
            timestamp,
            value,
            series_name,
            color,
        }
    }
}

/// Host viewport in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 400.0)
    }
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const BG_PANEL: &str = "#ffffff";
    pub const BG_TOOLTIP: &str = "#1a1a1a";
    pub const AXIS: &str = "#666666";
    pub const GRID: &str = "#eeeeee";
    pub const TEXT_PRIMARY: &str = "#fafafa";
    pub const TEXT_MUTED: &str = "#666666";
    pub const CURSOR: &str = "#999999";

    /// D3 `schemeCategory10`
    pub const CATEGORY10: [&str; 10] = [
        "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
        "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
    ];

    /// Validate a `#rrggbb` / `#rgb` hex color
    pub fn is_hex_color(value: &str) -> bool {
        let Some(hex) = value.strip_prefix('#') else {
            return false;
        };
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    }
}
