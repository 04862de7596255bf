//! Multi-axis line chart component
//!
//! Draws a precomposed [`Scene`] as SVG: x-axis, one line or point layer per
//! series, one vertical axis per visible series, and the hover cursor.

use crate::{
    colors,
    hit_test::Hover,
    scene::{AxisLayer, Scene, SeriesLayer},
};
use leptos::prelude::*;
use linevis_core::SeriesName;
use web_sys::MouseEvent;

const FONT: &str = "JetBrains Mono, monospace";

/// Pointer x in viewBox units, relative to the plot area
fn plot_x(svg: &web_sys::SvgElement, ev: &MouseEvent, scene: &Scene) -> f64 {
    let rect = svg.get_bounding_client_rect();
    client_to_plot_x(ev.client_x() as f64, rect.left(), rect.width(), scene)
}

/// Map a client x coordinate through the rendered box into the plot area
fn client_to_plot_x(client_x: f64, box_left: f64, box_width: f64, scene: &Scene) -> f64 {
    let scale = if box_width > 0.0 {
        scene.dims.width / box_width
    } else {
        1.0
    };
    (client_x - box_left) * scale - scene.dims.margin.left
}

fn multi_select(ev: &MouseEvent) -> bool {
    ev.ctrl_key() || ev.meta_key()
}

/// Line chart component
#[component]
pub fn LineChart(
    #[prop(into)] scene: Signal<Scene>,
    #[prop(into)] hover: Signal<Option<Hover>>,
    on_pointer_move: Callback<f64>,
    on_pointer_leave: Callback<()>,
    on_select: Callback<(SeriesName, bool)>,
    on_background: Callback<()>,
) -> impl IntoView {
    let svg_ref = NodeRef::<leptos::svg::Svg>::new();

    let on_move = move |ev: MouseEvent| {
        let Some(svg) = svg_ref.get() else {
            return;
        };
        let x = scene.with(|s| plot_x(&svg, &ev, s));
        on_pointer_move.run(x);
    };

    view! {
        <svg
            class="line-chart"
            node_ref=svg_ref
            viewBox=move || scene.with(|s| s.dims.viewbox())
            width=move || scene.with(|s| s.dims.width)
            height=move || scene.with(|s| s.dims.height)
            on:mousemove=on_move
            on:mouseleave=move |_| on_pointer_leave.run(())
            on:click=move |_| on_background.run(())
        >
            <rect
                width=move || scene.with(|s| s.dims.width)
                height=move || scene.with(|s| s.dims.height)
                fill=colors::BG_PANEL
            />

            <g transform=move || scene.with(|s| s.dims.inner_transform())>
                <XAxis scene=scene />

                {move || {
                    let scene = scene.get();
                    let stroke_width = scene.stroke_width;
                    let radius = scene.point_radius;
                    scene
                        .layers
                        .into_iter()
                        .map(|layer| view! {
                            <SeriesPath layer=layer stroke_width=stroke_width radius=radius on_select=on_select />
                        })
                        .collect_view()
                }}

                {move || {
                    let scene = scene.get();
                    let height = scene.dims.inner_height();
                    scene
                        .axes
                        .into_iter()
                        .map(|axis| view! { <SeriesAxis axis=axis height=height on_select=on_select /> })
                        .collect_view()
                }}

                <Cursor scene=scene hover=hover />
            </g>
        </svg>
    }
}

/// Horizontal time axis along the bottom of the plot
#[component]
fn XAxis(scene: Signal<Scene>) -> impl IntoView {
    move || {
        let scene = scene.get();
        let width = scene.dims.inner_width();
        let height = scene.dims.inner_height();

        view! {
            <g class="x-axis" transform=format!("translate(0, {})", height)>
                <line x1="0" y1="0" x2=width y2="0" stroke=colors::AXIS stroke-width="1" />
                {scene.x_ticks.into_iter().map(|tick| view! {
                    <g transform=format!("translate({}, 0)", tick.position)>
                        <line y2="6" stroke=colors::AXIS />
                        <text
                            y="9"
                            dy="0.71em"
                            text-anchor="middle"
                            fill=colors::TEXT_MUTED
                            font-size="10"
                            font-family=FONT
                        >
                            {tick.label}
                        </text>
                    </g>
                }).collect_view()}
            </g>
        }
    }
}

/// One series: a path for line style, circles for point style
#[component]
fn SeriesPath(
    layer: SeriesLayer,
    stroke_width: f64,
    radius: f64,
    on_select: Callback<(SeriesName, bool)>,
) -> impl IntoView {
    let name = layer.name.clone();
    let on_click = move |ev: MouseEvent| {
        ev.stop_propagation();
        on_select.run((name.clone(), multi_select(&ev)));
    };

    let color = layer.color.clone();
    let markers = layer
        .markers
        .into_iter()
        .map(|(cx, cy)| view! { <circle cx=cx cy=cy r=radius fill=color.clone() /> })
        .collect_view();

    view! {
        <g
            class="series"
            data-series=layer.name.to_string()
            opacity=layer.opacity
            style="cursor: pointer;"
            on:click=on_click
        >
            {layer.path.map(|d| view! {
                <path d=d fill="none" stroke=layer.color.clone() stroke-width=stroke_width />
            })}
            {markers}
        </g>
    }
}

/// Vertical axis for one series, labelled with the series name
#[component]
fn SeriesAxis(axis: AxisLayer, height: f64, on_select: Callback<(SeriesName, bool)>) -> impl IntoView {
    let name = axis.name.clone();
    let on_click = move |ev: MouseEvent| {
        ev.stop_propagation();
        on_select.run((name.clone(), multi_select(&ev)));
    };
    let color = axis.color.clone();

    view! {
        <g
            class="y-axis"
            transform=format!("translate({}, 0)", axis.offset_x)
            style="cursor: pointer;"
            on:click=on_click
        >
            <path d=axis.domain_path fill="none" stroke=axis.color.clone() />
            {axis.ticks.into_iter().map(|tick| view! {
                <g transform=format!("translate(0, {})", tick.position)>
                    <line x2="6" stroke=color.clone() />
                    <text x="9" dy="0.32em" fill=color.clone() font-size="10" font-family=FONT>
                        {tick.label}
                    </text>
                </g>
            }).collect_view()}
            <text
                transform=format!("translate(12, {}) rotate(-90)", height / 2.0)
                text-anchor="middle"
                fill=axis.color.clone()
                font-size="11"
                font-family=FONT
            >
                {axis.name.to_string()}
            </text>
        </g>
    }
}

/// Vertical cursor line plus markers on the nearest points
#[component]
fn Cursor(scene: Signal<Scene>, hover: Signal<Option<Hover>>) -> impl IntoView {
    move || {
        let hover = hover.get()?;
        let (height, radius) = scene.with(|s| (s.dims.inner_height(), s.point_radius));

        Some(view! {
            <g class="cursor" pointer-events="none">
                <line
                    x1=hover.x y1="0"
                    x2=hover.x y2=height
                    stroke=colors::CURSOR
                    stroke-width="1"
                    stroke-dasharray="3,3"
                />
                {hover.points.into_iter().map(|p| view! {
                    <circle
                        cx=p.x
                        cy=p.y
                        r={radius + 1.5}
                        fill=colors::BG_PANEL
                        stroke=p.point.color
                        stroke-width="2"
                    />
                }).collect_view()}
            </g>
        })
    }
}
