//! Data reading and representation.
//!
//! This module holds the axis catalogs, masked stat arrays and the immutable
//! dataset context, plus the loaders that build it.

mod catalog;
mod dataset;
pub mod demo;
mod masked;
#[cfg(feature = "netcdf")]
mod reader;

pub use catalog::{
    band_label, Axis, AxisCatalog, AxisKind, ClimKind, ALL, ALL_MONTHS, ALL_SEASONS, HISTORICAL,
    NUM_AXES,
};
pub use dataset::{StatLayers, StatsDataset};
pub use masked::MaskedArray;
#[cfg(feature = "netcdf")]
pub use reader::DataReader;
