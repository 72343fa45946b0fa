//! Climstats - grouped bar charts of collected climate statistics.
//!
//! Climstats loads precomputed climatology statistics indexed by model,
//! scenario, year range, season or month, latitude band and longitude band,
//! and reduces any selection over those six axes to a table of bars ready
//! for plotting.
//!
//! # Features
//!
//! - Wildcard, aggregate and explicit per-axis selections
//! - Sparse gathering that skips model/scenario/year-range gaps
//! - Ratio to the historical baseline
//! - Latitude, longitude and model means
//! - Interactive terminal viewer with Gruvbox themes
//! - Clipboard and TSV export
//!
//! # Example
//!
//! ```
//! use climstats::data::demo::demo_dataset;
//! use climstats::pipeline::{compute_plot, PlotRequest};
//!
//! let dataset = demo_dataset()?;
//! let plot = compute_plot(&dataset, &PlotRequest::default())?;
//! println!("{}", plot.to_tsv());
//! # Ok::<(), climstats::StatsError>(())
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod chart;
pub mod clipboard;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod selector;
pub mod ui;

pub use error::{Result, StatsError};
