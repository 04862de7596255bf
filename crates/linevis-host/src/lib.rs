//! # linevis-host
//!
//! Bridge between the host and the visual: JSON host messages, their
//! dispatch onto [`linevis_state::VisualState`], and the wasm-bindgen export.

pub mod bridge;
pub mod visual;

pub use bridge::*;
pub use visual::*;

use linevis_core::{DataView, PropertyChange, SeriesName, SettingsError, Viewport};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload of an `update` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOptions {
    pub data_view: DataView,
    #[serde(default)]
    pub viewport: Viewport,
}

/// Host message envelope with discriminated union
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum HostMessage {
    #[serde(rename = "update")]
    Update(UpdateOptions),
    #[serde(rename = "select")]
    Select {
        series: SeriesName,
        #[serde(rename = "multiSelect", default)]
        multi_select: bool,
    },
    #[serde(rename = "clearSelection")]
    ClearSelection,
    #[serde(rename = "setProperty")]
    SetProperty(PropertyChange),
    #[serde(rename = "formatting")]
    Formatting,
}

/// Errors surfaced to the host
#[derive(Debug, Error)]
pub enum HostError {
    #[error("malformed host message: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl From<HostError> for wasm_bindgen::JsValue {
    fn from(err: HostError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
