//! # linevis
//!
//! WASM entry point: installs logging and the panic hook, mounts the visual
//! and feeds it generated demo data.

mod demo;

use leptos::prelude::*;
use linevis_core::Viewport;
use linevis_host::{HostMessage, UpdateOptions, Visual};
use tracing_subscriber::prelude::*;

fn main() {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize tracing for WASM
    tracing_subscriber::registry()
        .with(tracing_wasm::WASMLayer::new(
            tracing_wasm::WASMLayerConfigBuilder::new().build(),
        ))
        .init();

    tracing::info!("Starting linevis demo");

    let visual = Visual::new();
    visual.mount();

    let options = UpdateOptions {
        data_view: demo::demo_view(&mut rand::thread_rng()),
        viewport: window_viewport(),
    };

    let message = match serde_json::to_string(&HostMessage::Update(options)) {
        Ok(message) => message,
        Err(e) => {
            tracing::error!("Failed to encode demo update: {}", e);
            return;
        }
    };

    if let Err(e) = visual.message(&message) {
        tracing::error!("Demo update rejected: {:?}", e);
    }
}

/// Browser window size, falling back to the default viewport
fn window_viewport() -> Viewport {
    let window = window();
    let fallback = Viewport::default();
    let width = window.inner_width().ok().and_then(|v| v.as_f64());
    let height = window.inner_height().ok().and_then(|v| v.as_f64());

    Viewport::new(
        width.unwrap_or(fallback.width),
        height.map_or(fallback.height, |h| h * 0.8),
    )
}
