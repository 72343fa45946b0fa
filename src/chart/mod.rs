//! Grouped bar chart - geometry, colors and rendering.
//!
//! Each bar group of a [`PlotResult`](crate::pipeline::PlotResult) becomes one
//! colored series; groups sit side by side around every x position.

mod colormaps;
mod layout;
pub mod ui;

pub use colormaps::ColorPalette;
pub use layout::{tick_slots, BarLayout, ChartLayoutConfig};
