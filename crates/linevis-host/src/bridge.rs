//! Host message handling

use crate::{HostError, HostMessage, UpdateOptions};
use leptos::prelude::*;
use linevis_core::PropertyChange;
use linevis_state::VisualState;

/// Parse a host message
pub fn parse_message(text: &str) -> Result<HostMessage, HostError> {
    Ok(serde_json::from_str(text)?)
}

/// Dispatches host messages onto the visual state
#[derive(Clone, Copy)]
pub struct HostBridge {
    state: VisualState,
}

impl HostBridge {
    pub fn new(state: VisualState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> VisualState {
        self.state
    }

    /// Process a raw message. Malformed input is logged and returned as an
    /// error; the visual keeps its previous state.
    pub fn handle_message(&self, text: &str) -> Result<Option<String>, HostError> {
        self.report(parse_message(text).and_then(|msg| self.dispatch(msg)))
    }

    /// Raw `update` payload: `{ dataView, viewport }`
    pub fn handle_update(&self, text: &str) -> Result<(), HostError> {
        let result = serde_json::from_str::<UpdateOptions>(text)
            .map_err(HostError::from)
            .and_then(|options| self.dispatch(HostMessage::Update(options)));
        self.report(result).map(|_| ())
    }

    /// Raw property change; replies with the objects to persist
    pub fn handle_property(&self, text: &str) -> Result<String, HostError> {
        let result = serde_json::from_str::<PropertyChange>(text)
            .map_err(HostError::from)
            .and_then(|change| self.dispatch(HostMessage::SetProperty(change)));
        self.report(result).map(Option::unwrap_or_default)
    }

    /// Log failures and surface them in the error banner
    fn report<T>(&self, result: Result<T, HostError>) -> Result<T, HostError> {
        match &result {
            Ok(_) => self.state.clear_error(),
            Err(e) => {
                tracing::warn!("Failed to handle host message: {}", e);
                self.state.set_error(e.to_string());
            }
        }
        result
    }

    /// Dispatch parsed message to the matching state handler. Messages that
    /// answer the host return a JSON reply.
    pub fn dispatch(&self, msg: HostMessage) -> Result<Option<String>, HostError> {
        match msg {
            HostMessage::Update(UpdateOptions { data_view, viewport }) => {
                self.state.update(data_view, viewport);
                Ok(None)
            }
            HostMessage::Select { series, multi_select } => {
                self.state.select(series, multi_select);
                Ok(None)
            }
            HostMessage::ClearSelection => {
                self.state.clear_selection();
                Ok(None)
            }
            HostMessage::SetProperty(change) => {
                self.state.set_property(&change)?;
                let objects = self.state.settings.with_untracked(|s| s.to_objects());
                Ok(Some(serde_json::Value::Object(objects).to_string()))
            }
            HostMessage::Formatting => {
                tracing::trace!("Formatting model requested");
                Ok(Some(self.state.formatting_model().to_json()))
            }
        }
    }
}
