//! # linevis-components
//!
//! Leptos UI components for the line chart visual.

mod legend;
mod tooltip;
mod visual;

pub use legend::*;
pub use tooltip::*;
pub use visual::*;
