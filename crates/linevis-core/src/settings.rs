//! Visual settings model
//!
//! Mirrors the formatting objects the host persists between sessions. The
//! model is rebuilt from `metadata.objects` on every update and mutated in
//! place when the host forwards a single property change.

use crate::{colors, SeriesName};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Card and property identifiers shared with the host
pub mod names {
    pub const Y_AXIS: &str = "yAxis";
    pub const DATA_POINTS: &str = "dataPoints";
    pub const AXES: &str = "axes";
    pub const SERIES: &str = "series";

    pub const AUTO_SCALE_Y: &str = "autoScaleY";
    pub const MIN_RANGE_Y: &str = "minRangeY";
    pub const MAX_RANGE_Y: &str = "maxRangeY";
    pub const DISPLAY_POINTS: &str = "displayPoints";
    pub const HIDE_ALL_AXIS: &str = "hideAllAxis";
    pub const COLOR: &str = "color";
    pub const STYLE: &str = "style";
    pub const DISPLAY_AXIS: &str = "displayAxis";
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown formatting card `{0}`")]
    UnknownCard(String),
    #[error("unknown property `{property}` on card `{card}`")]
    UnknownProperty { card: String, property: String },
    #[error("property `{0}` requires a series selector")]
    MissingSelector(String),
    #[error("invalid value for `{property}`: expected {expected}")]
    InvalidValue {
        property: String,
        expected: &'static str,
    },
}

// ============================================================================
// SERIES STYLE
// ============================================================================

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesStyle {
    #[default]
    Line,
    Point,
}

impl SeriesStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Point => "point",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Line => "Line",
            Self::Point => "Point",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "line" => Some(Self::Line),
            "point" | "points" => Some(Self::Point),
            _ => None,
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Line, Self::Point]
    }
}

/// Per-series formatting entry
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSettings {
    /// Color override; `None` uses the palette
    pub color: Option<String>,
    pub style: SeriesStyle,
    /// Configured axis visibility (before `hideAllAxis`)
    pub display_axis: bool,
}

impl Default for SeriesSettings {
    fn default() -> Self {
        Self {
            color: None,
            style: SeriesStyle::Line,
            display_axis: true,
        }
    }
}

/// Vertical scale domain policy handed to the series builder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleConfig {
    pub auto_scale: bool,
    pub fixed_min: f64,
    pub fixed_max: f64,
}

impl ScaleConfig {
    pub fn auto() -> Self {
        Self {
            auto_scale: true,
            ..Self::default()
        }
    }

    pub fn fixed(min: f64, max: f64) -> Self {
        Self {
            auto_scale: false,
            fixed_min: min,
            fixed_max: max,
        }
    }
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            auto_scale: true,
            fixed_min: 0.0,
            fixed_max: 100.0,
        }
    }
}

/// A single property change forwarded by the formatting pane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyChange {
    pub card: String,
    pub property: String,
    #[serde(default)]
    pub selector: Option<String>,
    pub value: Value,
}

// ============================================================================
// VISUAL SETTINGS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct VisualSettings {
    pub auto_scale_y: bool,
    pub min_range_y: f64,
    pub max_range_y: f64,
    pub display_points: bool,
    pub hide_all_axis: bool,
    pub series: BTreeMap<String, SeriesSettings>,
}

impl Default for VisualSettings {
    fn default() -> Self {
        let scale = ScaleConfig::default();
        Self {
            auto_scale_y: scale.auto_scale,
            min_range_y: scale.fixed_min,
            max_range_y: scale.fixed_max,
            display_points: true,
            hide_all_axis: false,
            series: BTreeMap::new(),
        }
    }
}

impl VisualSettings {
    /// Build from host-persisted objects. Unknown keys are ignored; values of
    /// the wrong type keep their default.
    pub fn from_objects(objects: &Map<String, Value>) -> Self {
        let mut settings = Self::default();

        for (card, properties) in objects {
            let Some(properties) = properties.as_object() else {
                tracing::warn!("Formatting object `{}` is not an object", card);
                continue;
            };

            if card == names::SERIES {
                for (name, entry) in properties {
                    let Some(entry) = entry.as_object() else {
                        continue;
                    };
                    for (property, value) in entry {
                        settings.apply_logged(card, property, Some(name.as_str()), value);
                    }
                }
            } else {
                for (property, value) in properties {
                    settings.apply_logged(card, property, None, value);
                }
            }
        }

        settings
    }

    fn apply_logged(&mut self, card: &str, property: &str, selector: Option<&str>, value: &Value) {
        if let Err(e) = self.set(card, property, selector, value) {
            tracing::warn!("Ignoring persisted formatting value: {}", e);
        }
    }

    /// Apply a property change from the formatting pane
    pub fn apply(&mut self, change: &PropertyChange) -> Result<(), SettingsError> {
        self.set(
            &change.card,
            &change.property,
            change.selector.as_deref(),
            &change.value,
        )
    }

    fn set(
        &mut self,
        card: &str,
        property: &str,
        selector: Option<&str>,
        value: &Value,
    ) -> Result<(), SettingsError> {
        let unknown = || SettingsError::UnknownProperty {
            card: card.to_string(),
            property: property.to_string(),
        };

        match card {
            names::Y_AXIS => match property {
                names::AUTO_SCALE_Y => self.auto_scale_y = expect_bool(property, value)?,
                names::MIN_RANGE_Y => self.min_range_y = expect_number(property, value)?,
                names::MAX_RANGE_Y => self.max_range_y = expect_number(property, value)?,
                _ => return Err(unknown()),
            },
            names::DATA_POINTS => match property {
                names::DISPLAY_POINTS => self.display_points = expect_bool(property, value)?,
                _ => return Err(unknown()),
            },
            names::AXES => match property {
                names::HIDE_ALL_AXIS => self.hide_all_axis = expect_bool(property, value)?,
                _ => return Err(unknown()),
            },
            names::SERIES => {
                let name = selector.ok_or_else(|| SettingsError::MissingSelector(property.to_string()))?;
                match property {
                    names::COLOR => {
                        let color = expect_color(property, value)?;
                        self.series_entry(name).color = Some(color);
                    }
                    names::STYLE => {
                        let style = value
                            .as_str()
                            .and_then(SeriesStyle::parse)
                            .ok_or(SettingsError::InvalidValue {
                                property: property.to_string(),
                                expected: "`line` or `point`",
                            })?;
                        self.series_entry(name).style = style;
                    }
                    names::DISPLAY_AXIS => {
                        let display = expect_bool(property, value)?;
                        self.series_entry(name).display_axis = display;
                    }
                    _ => return Err(unknown()),
                }
            }
            _ => return Err(SettingsError::UnknownCard(card.to_string())),
        }

        Ok(())
    }

    fn series_entry(&mut self, name: &str) -> &mut SeriesSettings {
        self.series.entry(name.to_string()).or_default()
    }

    /// Settings for a series (defaults when never configured)
    pub fn series_settings(&self, name: &str) -> SeriesSettings {
        self.series.get(name).cloned().unwrap_or_default()
    }

    pub fn series_style(&self, name: &str) -> SeriesStyle {
        self.series.get(name).map_or(SeriesStyle::Line, |s| s.style)
    }

    /// Axis visibility after applying `hideAllAxis`. Configured values are
    /// untouched, so clearing the global flag restores them.
    pub fn effective_display_axis(&self, name: &str) -> bool {
        !self.hide_all_axis && self.series.get(name).is_none_or(|s| s.display_axis)
    }

    pub fn set_hide_all_axis(&mut self, hide: bool) {
        self.hide_all_axis = hide;
    }

    /// Color overrides keyed by series name
    pub fn color_overrides(&self) -> HashMap<String, String> {
        self.series
            .iter()
            .filter_map(|(name, s)| s.color.clone().map(|c| (name.clone(), c)))
            .collect()
    }

    pub fn scale_config(&self) -> ScaleConfig {
        ScaleConfig {
            auto_scale: self.auto_scale_y,
            fixed_min: self.min_range_y,
            fixed_max: self.max_range_y,
        }
    }

    /// Serialize back into the host's object layout
    pub fn to_objects(&self) -> Map<String, Value> {
        let mut objects = Map::new();

        let mut y_axis = Map::new();
        y_axis.insert(names::AUTO_SCALE_Y.into(), Value::Bool(self.auto_scale_y));
        y_axis.insert(names::MIN_RANGE_Y.into(), Value::from(self.min_range_y));
        y_axis.insert(names::MAX_RANGE_Y.into(), Value::from(self.max_range_y));
        objects.insert(names::Y_AXIS.into(), Value::Object(y_axis));

        let mut data_points = Map::new();
        data_points.insert(names::DISPLAY_POINTS.into(), Value::Bool(self.display_points));
        objects.insert(names::DATA_POINTS.into(), Value::Object(data_points));

        let mut axes = Map::new();
        axes.insert(names::HIDE_ALL_AXIS.into(), Value::Bool(self.hide_all_axis));
        objects.insert(names::AXES.into(), Value::Object(axes));

        let mut series = Map::new();
        for (name, entry) in &self.series {
            let mut props = Map::new();
            if let Some(color) = &entry.color {
                props.insert(names::COLOR.into(), Value::String(color.clone()));
            }
            props.insert(names::STYLE.into(), Value::String(entry.style.as_str().into()));
            props.insert(names::DISPLAY_AXIS.into(), Value::Bool(entry.display_axis));
            series.insert(name.clone(), Value::Object(props));
        }
        objects.insert(names::SERIES.into(), Value::Object(series));

        objects
    }

    /// Drop entries for series no longer present in the data
    pub fn retain_series(&mut self, present: &[SeriesName]) {
        self.series
            .retain(|name, _| present.iter().any(|p| p.as_str() == name));
    }
}

fn expect_bool(property: &str, value: &Value) -> Result<bool, SettingsError> {
    value.as_bool().ok_or(SettingsError::InvalidValue {
        property: property.to_string(),
        expected: "a boolean",
    })
}

fn expect_number(property: &str, value: &Value) -> Result<f64, SettingsError> {
    value
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or(SettingsError::InvalidValue {
            property: property.to_string(),
            expected: "a finite number",
        })
}

/// Accepts `"#rrggbb"` or the host fill shape `{ "solid": { "color": "#rrggbb" } }`
fn expect_color(property: &str, value: &Value) -> Result<String, SettingsError> {
    let color = value
        .as_str()
        .or_else(|| value.pointer("/solid/color").and_then(Value::as_str));

    match color {
        Some(c) if colors::is_hex_color(c) => Ok(c.to_string()),
        _ => Err(SettingsError::InvalidValue {
            property: property.to_string(),
            expected: "a hex color",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn objects(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = VisualSettings::default();
        assert!(settings.auto_scale_y);
        assert!(settings.display_points);
        assert!(!settings.hide_all_axis);
        assert_eq!(settings.series_style("A"), SeriesStyle::Line);
        assert!(settings.effective_display_axis("A"));
    }

    #[test]
    fn test_from_objects() {
        let settings = VisualSettings::from_objects(&objects(json!({
            "yAxis": { "autoScaleY": false, "minRangeY": -5, "maxRangeY": 50 },
            "dataPoints": { "displayPoints": false },
            "series": {
                "A": { "color": { "solid": { "color": "#123456" } }, "style": "point" },
                "B": { "displayAxis": false }
            }
        })));

        assert_eq!(settings.scale_config(), ScaleConfig::fixed(-5.0, 50.0));
        assert!(!settings.display_points);
        assert_eq!(settings.series_style("A"), SeriesStyle::Point);
        assert_eq!(settings.series_settings("A").color.as_deref(), Some("#123456"));
        assert!(!settings.effective_display_axis("B"));
        assert!(settings.effective_display_axis("A"));
    }

    #[test]
    fn test_from_objects_keeps_defaults_on_bad_values() {
        let settings = VisualSettings::from_objects(&objects(json!({
            "yAxis": { "autoScaleY": "yes", "bogus": 1 },
            "unknownCard": { "x": 1 },
            "series": { "A": { "color": "red" } }
        })));

        assert!(settings.auto_scale_y);
        assert_eq!(settings.series_settings("A").color, None);
    }

    #[test]
    fn test_hide_all_axis_restores_configured_values() {
        let mut settings = VisualSettings::default();
        settings
            .apply(&PropertyChange {
                card: "series".into(),
                property: "displayAxis".into(),
                selector: Some("B".into()),
                value: json!(false),
            })
            .unwrap();

        settings.set_hide_all_axis(true);
        assert!(!settings.effective_display_axis("A"));
        assert!(!settings.effective_display_axis("B"));

        settings.set_hide_all_axis(false);
        assert!(settings.effective_display_axis("A"));
        assert!(!settings.effective_display_axis("B"));
    }

    #[test]
    fn test_apply_errors() {
        let mut settings = VisualSettings::default();

        let missing = PropertyChange {
            card: "series".into(),
            property: "style".into(),
            selector: None,
            value: json!("line"),
        };
        assert_eq!(
            settings.apply(&missing),
            Err(SettingsError::MissingSelector("style".into()))
        );

        let bad_card = PropertyChange {
            card: "legend".into(),
            property: "show".into(),
            selector: None,
            value: json!(true),
        };
        assert!(matches!(settings.apply(&bad_card), Err(SettingsError::UnknownCard(_))));

        let bad_value = PropertyChange {
            card: "yAxis".into(),
            property: "minRangeY".into(),
            selector: None,
            value: json!("ten"),
        };
        assert!(matches!(
            settings.apply(&bad_value),
            Err(SettingsError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_objects_round_trip() {
        let mut settings = VisualSettings::default();
        settings.auto_scale_y = false;
        settings.hide_all_axis = true;
        settings.series.insert(
            "A".into(),
            SeriesSettings {
                color: Some("#abcdef".into()),
                style: SeriesStyle::Point,
                display_axis: false,
            },
        );

        let restored = VisualSettings::from_objects(&settings.to_objects());
        assert_eq!(restored, settings);
    }

    #[test]
    fn test_retain_series() {
        let mut settings = VisualSettings::default();
        settings.series.insert("A".into(), SeriesSettings::default());
        settings.series.insert("Z".into(), SeriesSettings::default());

        settings.retain_series(&[SeriesName::new("A")]);
        assert!(settings.series.contains_key("A"));
        assert!(!settings.series.contains_key("Z"));
    }
}
