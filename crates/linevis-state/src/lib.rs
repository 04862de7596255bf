//! # linevis-state
//!
//! Reactive state for the line chart visual.
//! Host input lands in signals; the series set and scene are memos derived
//! from them, so each update recomposes the chart exactly once.

pub mod interaction;

pub use interaction::*;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use linevis_charts::{Highlight, Hover, LineChartConfig, Scene, SeriesSet};
use linevis_core::{
    formatting_model, DataView, FormattingModel, PropertyChange, SeriesName, SettingsError,
    Viewport, VisualSettings,
};

// ============================================================================
// VISUAL STATE
// ============================================================================

/// Visual state with reactive signals
#[derive(Clone, Copy)]
pub struct VisualState {
    /// Latest data view from the host
    pub data_view: RwSignal<DataView>,
    /// Host viewport
    pub viewport: RwSignal<Viewport>,
    /// Formatting settings, parsed from the data view and edited in place
    pub settings: RwSignal<VisualSettings>,
    /// Highlighted series
    pub highlight: RwSignal<Highlight>,
    /// Nearest points under the pointer; drives the cursor line
    pub hover: RwSignal<Option<Hover>>,
    /// Tooltip shown once the pointer has rested
    pub tooltip_visible: RwSignal<bool>,
    /// Last error reported by the host bridge
    pub error: RwSignal<Option<String>>,
    /// Built series and per-series vertical domains
    pub series_set: Memo<SeriesSet>,
    /// Composed chart
    pub scene: Memo<Scene>,
    pub config: LineChartConfig,
    debounce: StoredValue<TooltipDebounce>,
    timer: StoredValue<Option<Timeout>, LocalStorage>,
}

impl VisualState {
    pub fn new() -> Self {
        Self::with_config(LineChartConfig::default())
    }

    pub fn with_config(config: LineChartConfig) -> Self {
        let data_view = RwSignal::new(DataView::default());
        let viewport = RwSignal::new(Viewport::default());
        let settings = RwSignal::new(VisualSettings::default());
        let highlight = RwSignal::new(Highlight::none());

        let series_set = Memo::new(move |_| {
            data_view.with(|view| settings.with(|settings| SeriesSet::from_view(view, settings)))
        });

        let scene = Memo::new(move |_| {
            series_set.with(|set| {
                settings.with(|settings| {
                    highlight.with(|highlight| {
                        Scene::render(set, settings, viewport.get(), &config, highlight)
                    })
                })
            })
        });

        Self {
            data_view,
            viewport,
            settings,
            highlight,
            hover: RwSignal::new(None),
            tooltip_visible: RwSignal::new(false),
            error: RwSignal::new(None),
            series_set,
            scene,
            config,
            debounce: StoredValue::new(TooltipDebounce::new()),
            timer: StoredValue::new_local(None),
        }
    }

    // ========================================================================
    // Host Updates
    // ========================================================================

    /// New data view and viewport from the host. Settings are re-read from
    /// the view's persisted objects.
    pub fn update(&self, view: DataView, viewport: Viewport) {
        let settings = VisualSettings::from_objects(&view.metadata.objects);

        self.settings.set(settings);
        self.data_view.set(view);
        self.viewport.set(viewport);

        let present = self.series_set.with_untracked(SeriesSet::names);
        self.highlight.update(|h| h.retain(&present));
        self.dismiss_tooltip();

        tracing::debug!(
            series = present.len(),
            width = viewport.width,
            height = viewport.height,
            "Visual updated"
        );
    }

    /// Apply one property change from the formatting pane
    pub fn set_property(&self, change: &PropertyChange) -> Result<(), SettingsError> {
        let mut settings = self.settings.get_untracked();
        settings.apply(change)?;
        self.settings.set(settings);

        tracing::debug!(card = %change.card, property = %change.property, "Property changed");
        Ok(())
    }

    /// Formatting pane description for the current settings and series
    pub fn formatting_model(&self) -> FormattingModel {
        let series: Vec<(SeriesName, String)> = self.series_set.with_untracked(|set| {
            set.series
                .iter()
                .map(|s| (s.name.clone(), s.color.clone()))
                .collect()
        });
        self.settings
            .with_untracked(|settings| formatting_model(settings, &series))
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Click on a series' line, points or axis
    pub fn select(&self, name: SeriesName, multi_select: bool) {
        tracing::debug!(series = %name, multi_select, "Series selected");
        self.highlight.update(|h| h.select(name, multi_select));
    }

    /// Background click
    pub fn clear_selection(&self) {
        self.highlight.update(Highlight::clear);
    }

    // ========================================================================
    // Pointer / Tooltip
    // ========================================================================

    /// Pointer moved to `plot_x` inside the plot area. The cursor follows
    /// immediately; the tooltip waits for the pointer to rest.
    pub fn pointer_move(&self, plot_x: f64) {
        let hover = self.scene.with_untracked(|scene| scene.hover_at(plot_x));
        self.hover.set(hover);
        self.tooltip_visible.set(false);

        let mut token = 0;
        self.debounce.update_value(|d| token = d.schedule());

        let state = *self;
        let timeout = Timeout::new(self.config.tooltip_delay_ms, move || state.show_tooltip(token));
        // Replacing the slot drops, and thereby cancels, the previous timer
        self.timer.set_value(Some(timeout));
    }

    /// Pointer left the chart: cancel any pending tooltip and clear hover
    pub fn pointer_leave(&self) {
        self.dismiss_tooltip();
        self.hover.set(None);
    }

    fn dismiss_tooltip(&self) {
        self.debounce.update_value(TooltipDebounce::cancel);
        self.timer.set_value(None);
        self.tooltip_visible.set(false);
    }

    fn show_tooltip(&self, token: u64) {
        let mut current = false;
        self.debounce.update_value(|d| current = d.fire(token));

        let has_points = self
            .hover
            .with_untracked(|h| h.as_ref().is_some_and(|h| !h.is_empty()));

        if current && has_points {
            self.tooltip_visible.set(true);
        }
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Set error message
    pub fn set_error(&self, msg: impl Into<String>) {
        self.error.set(Some(msg.into()));
    }

    /// Clear error
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONTEXT HELPERS
// ============================================================================

/// Provide visual state context to component tree
pub fn provide_visual_state(state: VisualState) -> VisualState {
    provide_context(state);
    state
}

/// Use visual state from context
pub fn use_visual_state() -> VisualState {
    expect_context::<VisualState>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use linevis_core::settings::names;
    use serde_json::json;

    fn view() -> DataView {
        serde_json::from_value(json!({
            "categorical": {
                "categories": [{ "source": { "displayName": "Date" },
                                 "values": ["2024-01-01", "2024-01-02"] }],
                "values": [
                    { "source": { "displayName": "Sales", "groupName": "A" }, "values": [1.0, 2.0] },
                    { "source": { "displayName": "Sales", "groupName": "B" }, "values": [10.0, null] }
                ]
            },
            "metadata": { "objects": { "dataPoints": { "displayPoints": false } } }
        }))
        .unwrap()
    }

    #[test]
    fn test_update_builds_scene() {
        let state = VisualState::new();
        state.update(view(), Viewport::new(600.0, 300.0));

        assert!(!state.settings.get_untracked().display_points);
        let report = state.series_set.with_untracked(|s| s.report);
        assert_eq!((report.kept, report.dropped), (3, 1));
        assert_eq!(state.scene.with_untracked(|s| s.layers.len()), 2);
        assert_eq!(state.scene.with_untracked(|s| s.dims.width), 600.0);
    }

    #[test]
    fn test_select_and_clear() {
        let state = VisualState::new();
        state.update(view(), Viewport::default());

        state.select("A".into(), false);
        let opacity = state
            .scene
            .with_untracked(|s| s.layer(&"B".into()).map(|l| l.opacity));
        assert_eq!(opacity, Some(0.2));

        state.clear_selection();
        assert!(!state.highlight.get_untracked().is_active());
    }

    #[test]
    fn test_update_forgets_missing_highlight() {
        let state = VisualState::new();
        state.update(view(), Viewport::default());
        state.select("B".into(), false);

        state.update(DataView::default(), Viewport::default());
        assert!(!state.highlight.get_untracked().is_active());
    }

    #[test]
    fn test_set_property_rejects_invalid_value() {
        let state = VisualState::new();
        let change = PropertyChange {
            card: names::AXES.into(),
            property: names::HIDE_ALL_AXIS.into(),
            selector: None,
            value: json!("yes"),
        };

        assert!(state.set_property(&change).is_err());
        assert!(!state.settings.get_untracked().hide_all_axis);
    }

    #[test]
    fn test_hide_all_axis_removes_axes() {
        let state = VisualState::new();
        state.update(view(), Viewport::default());
        let change = PropertyChange {
            card: names::AXES.into(),
            property: names::HIDE_ALL_AXIS.into(),
            selector: None,
            value: json!(true),
        };

        state.set_property(&change).unwrap();
        assert!(state.scene.with_untracked(|s| s.axes.is_empty()));
    }

    #[test]
    fn test_formatting_model_lists_series() {
        let state = VisualState::new();
        state.update(view(), Viewport::default());

        let model = state.formatting_model();
        let series = model.card(names::SERIES).map(|c| c.slices.len());
        assert_eq!(series, Some(6));
    }

    #[test]
    fn test_pointer_leave_clears_hover() {
        let state = VisualState::new();
        state.hover.set(None);
        state.pointer_leave();

        assert!(state.hover.get_untracked().is_none());
        assert!(!state.tooltip_visible.get_untracked());
    }
}
