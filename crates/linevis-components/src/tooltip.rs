//! Tooltip with the nearest values under the pointer

use linevis_charts::{colors, format_date, Hover, Scene};
use linevis_core::{DecimalFormatter, ValueFormatter};
use linevis_state::use_visual_state;
use leptos::prelude::*;

/// Tooltip anchor as percentages of the chart box. Flips to the left of the
/// cursor past the middle so it stays inside the chart.
fn anchor(scene: &Scene, hover: &Hover) -> (f64, bool) {
    if scene.dims.width <= 0.0 {
        return (0.0, false);
    }
    let left = (hover.x + scene.dims.margin.left) / scene.dims.width * 100.0;
    (left, left > 50.0)
}

#[component]
pub fn TooltipPanel() -> impl IntoView {
    let state = use_visual_state();
    let formatter = DecimalFormatter::default();

    move || {
        if !state.tooltip_visible.get() {
            return None;
        }
        let hover = state.hover.get().filter(|h| !h.is_empty())?;
        let (left, flip) = state.scene.with(|scene| anchor(scene, &hover));

        let position = if flip {
            format!("right: {:.2}%;", 100.0 - left)
        } else {
            format!("left: {:.2}%;", left)
        };
        let date = hover
            .points
            .first()
            .map(|p| format_date(p.point.timestamp))
            .unwrap_or_default();

        let rows = hover
            .points
            .into_iter()
            .map(|p| {
                view! {
                    <div class="tooltip-row">
                        <span class="tooltip-swatch" style=format!("background: {};", p.point.color) />
                        <span class="tooltip-series">{p.point.series_name.to_string()}</span>
                        <span class="tooltip-value">{formatter.format(p.point.value)}</span>
                    </div>
                }
            })
            .collect_view();

        Some(view! {
            <div
                class="linevis-tooltip"
                style=format!(
                    "position: absolute; top: 8px; {} background: {}; color: {}; pointer-events: none;",
                    position,
                    colors::BG_TOOLTIP,
                    colors::TEXT_PRIMARY,
                )
            >
                <div class="tooltip-date">{date}</div>
                {rows}
            </div>
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linevis_charts::ChartDimensions;

    fn hover(x: f64) -> Hover {
        Hover {
            timestamp: 0,
            x,
            points: Vec::new(),
        }
    }

    #[test]
    fn test_anchor_percent_and_flip() {
        let scene = Scene {
            dims: ChartDimensions::new(1000.0, 400.0),
            ..Scene::default()
        };

        assert_eq!(anchor(&scene, &hover(150.0)), (20.0, false));
        assert_eq!(anchor(&scene, &hover(650.0)), (70.0, true));
    }

    #[test]
    fn test_anchor_zero_width() {
        let scene = Scene {
            dims: ChartDimensions::new(0.0, 0.0),
            ..Scene::default()
        };
        assert_eq!(anchor(&scene, &hover(10.0)), (0.0, false));
    }
}
