//! Formatting pane description handed back to the host
//!
//! One card per settings group; per-series slices are emitted in series
//! order and carry the series name as their selector.

use crate::{names, SeriesName, SeriesStyle, VisualSettings};
use serde::{Deserialize, Serialize};

/// Pane control with its current value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Control {
    ToggleSwitch(bool),
    NumUpDown(f64),
    ColorPicker(String),
    Dropdown(DropdownValue),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownValue {
    pub selected: String,
    pub options: Vec<DropdownOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownOption {
    pub value: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice {
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    pub control: Control,
}

impl Slice {
    fn new(name: &str, display_name: impl Into<String>, control: Control) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.into(),
            selector: None,
            disabled: false,
            control,
        }
    }

    fn selector(mut self, series: &SeriesName) -> Self {
        self.selector = Some(series.as_str().to_string());
        self
    }

    fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub name: String,
    pub display_name: String,
    pub slices: Vec<Slice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormattingModel {
    pub cards: Vec<Card>,
}

impl FormattingModel {
    pub fn card(&self, name: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.name == name)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn style_dropdown(selected: SeriesStyle) -> Control {
    Control::Dropdown(DropdownValue {
        selected: selected.as_str().to_string(),
        options: SeriesStyle::all()
            .iter()
            .map(|s| DropdownOption {
                value: s.as_str().to_string(),
                display_name: s.label().to_string(),
            })
            .collect(),
    })
}

/// Describe the formatting pane for the current settings.
///
/// `series` pairs each plotted series with its resolved color, in render
/// order.
pub fn formatting_model(settings: &VisualSettings, series: &[(SeriesName, String)]) -> FormattingModel {
    let y_axis = Card {
        name: names::Y_AXIS.into(),
        display_name: "Y Axis".into(),
        slices: vec![
            Slice::new(names::AUTO_SCALE_Y, "Auto scale", Control::ToggleSwitch(settings.auto_scale_y)),
            Slice::new(names::MIN_RANGE_Y, "Minimum", Control::NumUpDown(settings.min_range_y))
                .disabled(settings.auto_scale_y),
            Slice::new(names::MAX_RANGE_Y, "Maximum", Control::NumUpDown(settings.max_range_y))
                .disabled(settings.auto_scale_y),
        ],
    };

    let data_points = Card {
        name: names::DATA_POINTS.into(),
        display_name: "Data Points".into(),
        slices: vec![Slice::new(
            names::DISPLAY_POINTS,
            "Display points",
            Control::ToggleSwitch(settings.display_points),
        )],
    };

    let axes = Card {
        name: names::AXES.into(),
        display_name: "Axes".into(),
        slices: vec![Slice::new(
            names::HIDE_ALL_AXIS,
            "Hide all axes",
            Control::ToggleSwitch(settings.hide_all_axis),
        )],
    };

    let mut series_slices = Vec::with_capacity(series.len() * 3);
    for (name, color) in series {
        let entry = settings.series_settings(name.as_str());
        series_slices.push(
            Slice::new(names::COLOR, name.as_str(), Control::ColorPicker(color.clone())).selector(name),
        );
        series_slices.push(
            Slice::new(names::STYLE, format!("{} style", name), style_dropdown(entry.style)).selector(name),
        );
        series_slices.push(
            Slice::new(
                names::DISPLAY_AXIS,
                format!("{} axis", name),
                Control::ToggleSwitch(settings.effective_display_axis(name.as_str())),
            )
            .selector(name)
            .disabled(settings.hide_all_axis),
        );
    }

    let series_card = Card {
        name: names::SERIES.into(),
        display_name: "Series".into(),
        slices: series_slices,
    };

    FormattingModel {
        cards: vec![y_axis, data_points, axes, series_card],
    }
}
