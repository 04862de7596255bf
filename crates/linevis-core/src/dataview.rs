//! Host data view types and row extraction
//!
//! The host hands over a categorical data view: one category column (the
//! time axis) and one or more value columns, each tagged with a group name.

use crate::{SeriesName, Timestamp};

/// Largest representable instant either side of the epoch, in milliseconds
/// (100,000,000 days)
pub const MAX_TIMESTAMP_MS: Timestamp = 8_640_000_000_000_000;

fn in_range(timestamp: Timestamp) -> Option<Timestamp> {
    (timestamp.abs() <= MAX_TIMESTAMP_MS).then_some(timestamp)
}
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// CELL VALUES
// ============================================================================

/// A single cell as the host serializes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// Numeric value, if the cell holds a finite number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Parse the cell as a timestamp (epoch milliseconds)
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Number(n) if n.abs() <= MAX_TIMESTAMP_MS as f64 => Some(n.trunc() as Timestamp),
            Self::Text(text) => parse_timestamp(text),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(text) => text.clone(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a category label as a timestamp.
///
/// Accepts RFC 3339 and a handful of naive date / date-time layouts (read as
/// UTC). Returns `None` for anything else.
pub fn parse_timestamp(text: &str) -> Option<Timestamp> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return in_range(dt.timestamp_millis());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return in_range(dt.and_utc().timestamp_millis());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .and_then(|dt| in_range(dt.and_utc().timestamp_millis()));
        }
    }

    None
}

// ============================================================================
// ROWS
// ============================================================================

/// Raw input tuple before validation
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub category: Option<CellValue>,
    pub series: SeriesName,
    pub value: Option<f64>,
}

impl Row {
    pub fn new(category: impl Into<CellValue>, series: impl Into<SeriesName>, value: f64) -> Self {
        Self {
            category: Some(category.into()),
            series: series.into(),
            value: Some(value),
        }
    }

    /// Parsed timestamp, `None` when the category is missing or unparseable
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.category.as_ref().and_then(CellValue::as_timestamp)
    }

    /// Finite numeric value
    pub fn finite_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }
}

// ============================================================================
// DATA VIEW
// ============================================================================

/// Column metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSource {
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<CellValue>,
}

impl ColumnSource {
    /// Series name for a value column (group name, else display name)
    pub fn series_name(&self) -> SeriesName {
        match &self.group_name {
            Some(group) => SeriesName::new(group.label()),
            None => SeriesName::new(self.display_name.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryColumn {
    #[serde(default)]
    pub source: ColumnSource,
    #[serde(default)]
    pub values: Vec<Option<CellValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueColumn {
    #[serde(default)]
    pub source: ColumnSource,
    #[serde(default)]
    pub values: Vec<Option<CellValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoricalView {
    #[serde(default)]
    pub categories: Vec<CategoryColumn>,
    #[serde(default)]
    pub values: Vec<ValueColumn>,
}

/// Host-persisted formatting objects: `{ card: { property: value } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataViewMetadata {
    #[serde(default)]
    pub objects: serde_json::Map<String, serde_json::Value>,
}

/// Categorical data view supplied by the host on every update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataView {
    #[serde(default)]
    pub categorical: Option<CategoricalView>,
    #[serde(default)]
    pub metadata: DataViewMetadata,
}

impl DataView {
    /// Flatten into rows: for each category index, for each value column.
    pub fn rows(&self) -> Vec<Row> {
        let Some(categorical) = &self.categorical else {
            return Vec::new();
        };
        let Some(category) = categorical.categories.first() else {
            return Vec::new();
        };

        let names: Vec<SeriesName> = categorical
            .values
            .iter()
            .map(|column| column.source.series_name())
            .collect();

        let mut rows = Vec::with_capacity(category.values.len() * names.len());
        for (index, category_value) in category.values.iter().enumerate() {
            for (column, name) in categorical.values.iter().zip(&names) {
                let value = column
                    .values
                    .get(index)
                    .and_then(|cell| cell.as_ref())
                    .and_then(CellValue::as_f64);

                rows.push(Row {
                    category: category_value.clone(),
                    series: name.clone(),
                    value,
                });
            }
        }
        rows
    }

    /// Number of value columns (series candidates)
    pub fn value_column_count(&self) -> usize {
        self.categorical.as_ref().map_or(0, |c| c.values.len())
    }
}
