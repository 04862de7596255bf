//! Visual root: chart, legend and tooltip wired to [`VisualState`]

use linevis_charts::LineChart;
use linevis_core::SeriesName;
use linevis_state::{provide_visual_state, use_visual_state, VisualState};
use leptos::prelude::*;

use crate::{Legend, TooltipPanel};

#[component]
pub fn LineChartVisual(state: VisualState) -> impl IntoView {
    let state = provide_visual_state(state);
    tracing::debug!(config = ?state.config, "Rendering line chart visual");

    let on_pointer_move = Callback::new(move |x: f64| state.pointer_move(x));
    let on_pointer_leave = Callback::new(move |_: ()| state.pointer_leave());
    let on_select = Callback::new(move |(name, multi): (SeriesName, bool)| state.select(name, multi));
    let on_background = Callback::new(move |_: ()| state.clear_selection());

    view! {
        <div class="linevis" style="position: relative; width: 100%; height: 100%;">
            <Legend />
            <div class="linevis-plot" style="position: relative;">
                <LineChart
                    scene=state.scene
                    hover=state.hover
                    on_pointer_move=on_pointer_move
                    on_pointer_leave=on_pointer_leave
                    on_select=on_select
                    on_background=on_background
                />
                <TooltipPanel />
            </div>
            <ErrorBanner />
        </div>
    }
}

#[component]
fn ErrorBanner() -> impl IntoView {
    let error = use_visual_state().error;

    move || {
        error.get().map(|e| {
            view! {
                <div class="linevis-error">
                    <span class="error-icon">"⚠"</span>
                    <span class="error-msg">{e}</span>
                </div>
            }
        })
    }
}
