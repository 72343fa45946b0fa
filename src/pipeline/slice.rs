//! The pipeline's intermediate currency.

use crate::data::{AxisKind, StatLayers};
use crate::error::{Result, StatsError};

/// Stat layers together with the category names present on each axis.
///
/// `layers.shape()[i] == names[i].len()` holds for every axis, at entry and
/// exit of every pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub struct GatheredSlice {
    /// Values and stdevs.
    pub layers: StatLayers,
    /// Axis identity of each dimension, in array order.
    pub axes: Vec<AxisKind>,
    /// Category names per dimension, in array order.
    pub names: Vec<Vec<String>>,
}

impl GatheredSlice {
    /// Create a slice, checking the shape invariant.
    pub fn new(layers: StatLayers, axes: Vec<AxisKind>, names: Vec<Vec<String>>) -> Result<Self> {
        let slice = Self { layers, axes, names };
        slice.check()?;
        Ok(slice)
    }

    /// Verify that every dimension length matches its name list.
    pub fn check(&self) -> Result<()> {
        let shape = self.layers.shape();
        let consistent = shape.len() == self.names.len()
            && shape.len() == self.axes.len()
            && shape
                .iter()
                .zip(self.names.iter())
                .all(|(&len, names)| len == names.len());
        if consistent {
            Ok(())
        } else {
            let lens: Vec<usize> = self.names.iter().map(Vec::len).collect();
            Err(StatsError::axis_consistency(format!(
                "array shape {:?} does not match name counts {:?} for axes {:?}",
                shape, lens, self.axes
            )))
        }
    }

    /// Dimension holding `axis`.
    pub fn position(&self, axis: AxisKind) -> Result<usize> {
        self.axes.iter().position(|&a| a == axis).ok_or_else(|| {
            StatsError::axis_consistency(format!("axis {} is not part of the slice", axis))
        })
    }

    /// Names on `axis`.
    pub fn names_of(&self, axis: AxisKind) -> Result<&[String]> {
        Ok(&self.names[self.position(axis)?])
    }

    /// Number of present values.
    pub fn count(&self) -> usize {
        self.layers.values.count()
    }
}
