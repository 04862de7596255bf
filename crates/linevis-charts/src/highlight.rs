//! Series highlighting
//!
//! Highlight state is an explicit value passed into scene composition;
//! nothing is read back from rendered elements.

use crate::layout::ResolvedStyle;
use linevis_core::{SeriesName, SeriesStyle};

/// Opacity of a highlighted series
pub const HIGHLIGHTED_OPACITY: f64 = 1.0;
/// Dimmed line series stay faintly visible
pub const DIMMED_LINE_OPACITY: f64 = 0.2;
/// Dimmed point series disappear
pub const DIMMED_POINT_OPACITY: f64 = 0.0;

/// Set of highlighted series; empty means no highlight
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlight {
    selected: Vec<SeriesName>,
}

impl Highlight {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn only(name: impl Into<SeriesName>) -> Self {
        Self {
            selected: vec![name.into()],
        }
    }

    pub fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn contains(&self, name: &SeriesName) -> bool {
        self.selected.contains(name)
    }

    pub fn selected(&self) -> &[SeriesName] {
        &self.selected
    }

    /// Click on a series' line, points or axis.
    ///
    /// Without `multi_select` the highlight becomes that series alone, or is
    /// cleared when it was already the only one. With `multi_select` the
    /// series is toggled in the set.
    pub fn select(&mut self, name: SeriesName, multi_select: bool) {
        if multi_select {
            if let Some(pos) = self.selected.iter().position(|n| *n == name) {
                self.selected.remove(pos);
            } else {
                self.selected.push(name);
            }
        } else if self.selected.len() == 1 && self.selected[0] == name {
            self.selected.clear();
        } else {
            self.selected = vec![name];
        }
    }

    /// Background click
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Forget series that are no longer plotted
    pub fn retain(&mut self, present: &[SeriesName]) {
        self.selected.retain(|n| present.contains(n));
    }
}

/// Opacity for a series under the current highlight
pub fn series_opacity(style: &ResolvedStyle, highlight: &Highlight) -> f64 {
    if !highlight.is_active() {
        return style.base_opacity;
    }

    if highlight.contains(&style.name) {
        HIGHLIGHTED_OPACITY
    } else {
        match style.style {
            SeriesStyle::Line => DIMMED_LINE_OPACITY,
            SeriesStyle::Point => DIMMED_POINT_OPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(name: &str, style: SeriesStyle, base_opacity: f64) -> ResolvedStyle {
        ResolvedStyle {
            name: name.into(),
            style,
            display_axis: true,
            color: "#000000".into(),
            base_opacity,
        }
    }

    #[test]
    fn test_highlight_opacities() {
        let a = style("A", SeriesStyle::Line, 1.0);
        let b = style("B", SeriesStyle::Line, 1.0);
        let c = style("C", SeriesStyle::Point, 1.0);

        let highlight = Highlight::only("A");
        assert_eq!(series_opacity(&a, &highlight), 1.0);
        assert_eq!(series_opacity(&b, &highlight), 0.2);
        assert_eq!(series_opacity(&c, &highlight), 0.0);
    }

    #[test]
    fn test_clear_restores_base() {
        let a = style("A", SeriesStyle::Line, 1.0);
        let hidden_points = style("P", SeriesStyle::Point, 0.0);

        let mut highlight = Highlight::only("A");
        highlight.clear();

        assert_eq!(series_opacity(&a, &highlight), 1.0);
        assert_eq!(series_opacity(&hidden_points, &highlight), 0.0);
    }

    #[test]
    fn test_highlighted_point_series_is_visible_even_if_base_hidden() {
        let hidden_points = style("P", SeriesStyle::Point, 0.0);
        assert_eq!(series_opacity(&hidden_points, &Highlight::only("P")), 1.0);
    }

    #[test]
    fn test_single_select_replaces_and_toggles_off() {
        let mut highlight = Highlight::none();

        highlight.select("A".into(), false);
        assert_eq!(highlight.selected(), &[SeriesName::new("A")]);

        highlight.select("B".into(), false);
        assert_eq!(highlight.selected(), &[SeriesName::new("B")]);

        highlight.select("B".into(), false);
        assert!(!highlight.is_active());
    }

    #[test]
    fn test_multi_select_toggles_membership() {
        let mut highlight = Highlight::only("A");

        highlight.select("B".into(), true);
        assert!(highlight.contains(&"A".into()));
        assert!(highlight.contains(&"B".into()));

        highlight.select("A".into(), true);
        assert!(!highlight.contains(&"A".into()));
        assert!(highlight.is_active());
    }

    #[test]
    fn test_retain_drops_missing_series() {
        let mut highlight = Highlight::only("A");
        highlight.retain(&[SeriesName::new("B")]);
        assert!(!highlight.is_active());
    }
}
