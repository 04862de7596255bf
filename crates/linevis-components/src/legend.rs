//! Clickable legend reflecting the current highlight

use linevis_charts::highlight::DIMMED_LINE_OPACITY;
use linevis_core::SeriesName;
use linevis_state::use_visual_state;
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct LegendEntry {
    name: SeriesName,
    color: String,
    dimmed: bool,
}

#[component]
pub fn Legend() -> impl IntoView {
    let state = use_visual_state();

    let entries = Memo::new(move |_| {
        let highlight = state.highlight.get();
        state.series_set.with(|set| {
            set.series
                .iter()
                .map(|s| LegendEntry {
                    name: s.name.clone(),
                    color: s.color.clone(),
                    dimmed: highlight.is_active() && !highlight.contains(&s.name),
                })
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div class="linevis-legend">
            {move || entries.get().into_iter().map(|entry| {
                let name = entry.name.clone();
                let opacity = if entry.dimmed { DIMMED_LINE_OPACITY } else { 1.0 };
                view! {
                    <span
                        class="legend-item"
                        style=format!("opacity: {}; cursor: pointer;", opacity)
                        on:click=move |ev| {
                            ev.stop_propagation();
                            state.select(name.clone(), ev.ctrl_key() || ev.meta_key());
                        }
                    >
                        <span
                            class="legend-swatch"
                            style=format!("background: {};", entry.color)
                        />
                        <span class="legend-label">{entry.name.to_string()}</span>
                    </span>
                }
            }).collect_view()}
        </div>
    }
}
