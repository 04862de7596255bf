//! wasm-bindgen export driven by the host page

use crate::HostBridge;
use leptos::prelude::*;
use linevis_components::LineChartVisual;
use linevis_state::VisualState;
use wasm_bindgen::prelude::*;

/// The visual as seen from JavaScript
#[wasm_bindgen]
pub struct Visual {
    bridge: HostBridge,
}

#[wasm_bindgen]
impl Visual {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Visual {
        Visual {
            bridge: HostBridge::new(VisualState::new()),
        }
    }

    /// Mount the chart into the document body
    pub fn mount(&self) {
        let state = self.bridge.state();
        leptos::mount::mount_to_body(move || view! { <LineChartVisual state=state /> });
        tracing::info!("Visual mounted");
    }

    /// Render trigger: `{ dataView, viewport }`
    pub fn update(&self, options: &str) -> Result<(), JsValue> {
        Ok(self.bridge.handle_update(options)?)
    }

    /// Generic host message; returns the JSON reply, if any
    pub fn message(&self, text: &str) -> Result<Option<String>, JsValue> {
        Ok(self.bridge.handle_message(text)?)
    }

    pub fn select(&self, series: String, multi_select: bool) {
        self.bridge.state().select(series.into(), multi_select);
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&self) {
        self.bridge.state().clear_selection();
    }

    /// Apply a property change; returns the objects to persist
    #[wasm_bindgen(js_name = setProperty)]
    pub fn set_property(&self, change: &str) -> Result<String, JsValue> {
        Ok(self.bridge.handle_property(change)?)
    }

    #[wasm_bindgen(js_name = formattingModel)]
    pub fn formatting_model(&self) -> String {
        self.bridge.state().formatting_model().to_json()
    }
}

impl Default for Visual {
    fn default() -> Self {
        Self::new()
    }
}
