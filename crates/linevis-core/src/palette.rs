//! Series color assignment

use crate::colors;
use std::collections::HashMap;

// ============================================================================
// STRATEGY PATTERN: Palette
// ============================================================================

/// Strategy trait for series colors, deterministic per key
pub trait Palette {
    fn color_for_key(&mut self, key: &str) -> String;
}

impl<F> Palette for F
where
    F: FnMut(&str) -> String,
{
    fn color_for_key(&mut self, key: &str) -> String {
        self(key)
    }
}

/// Ordinal palette (D3 `scaleOrdinal(schemeCategory10)`): colors are handed
/// out in first-request order and cycle after ten keys.
#[derive(Debug, Clone, Default)]
pub struct CategoricalPalette {
    assigned: HashMap<String, usize>,
}

impl CategoricalPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys seen so far
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

impl Palette for CategoricalPalette {
    fn color_for_key(&mut self, key: &str) -> String {
        let next = self.assigned.len();
        let index = *self.assigned.entry(key.to_string()).or_insert(next);
        colors::CATEGORY10[index % colors::CATEGORY10.len()].to_string()
    }
}

/// Palette that prefers per-series overrides over an inner palette
pub struct OverridePalette<'a, P> {
    overrides: &'a HashMap<String, String>,
    inner: P,
}

impl<'a, P: Palette> OverridePalette<'a, P> {
    pub fn new(overrides: &'a HashMap<String, String>, inner: P) -> Self {
        Self { overrides, inner }
    }
}

impl<P: Palette> Palette for OverridePalette<'_, P> {
    fn color_for_key(&mut self, key: &str) -> String {
        // Keep the inner assignment order stable even when overridden
        let fallback = self.inner.color_for_key(key);
        self.overrides.get(key).cloned().unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_palette_is_stable_per_key() {
        let mut palette = CategoricalPalette::new();
        let a = palette.color_for_key("A");
        let b = palette.color_for_key("B");

        assert_eq!(a, colors::CATEGORY10[0]);
        assert_eq!(b, colors::CATEGORY10[1]);
        assert_eq!(palette.color_for_key("A"), a);
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_categorical_palette_cycles() {
        let mut palette = CategoricalPalette::new();
        for i in 0..10 {
            palette.color_for_key(&format!("S{i}"));
        }
        assert_eq!(palette.color_for_key("S10"), colors::CATEGORY10[0]);
    }

    #[test]
    fn test_override_palette() {
        let overrides = HashMap::from([("B".to_string(), "#000000".to_string())]);
        let mut palette = OverridePalette::new(&overrides, CategoricalPalette::new());

        assert_eq!(palette.color_for_key("A"), colors::CATEGORY10[0]);
        assert_eq!(palette.color_for_key("B"), "#000000");
        assert_eq!(palette.color_for_key("C"), colors::CATEGORY10[2]);
    }

    #[test]
    fn test_closure_palette() {
        let mut palette = |key: &str| format!("color-{key}");
        assert_eq!(palette.color_for_key("A"), "color-A");
    }
}
