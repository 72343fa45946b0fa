//! The loaded collected-stats dataset.

use super::{AxisCatalog, ClimKind, MaskedArray};
use crate::error::{Result, StatsError};

/// A stat array and its standard deviations, always of identical shape.
#[derive(Debug, Clone, PartialEq)]
pub struct StatLayers {
    /// Statistic values.
    pub values: MaskedArray,
    /// Standard deviations of the values.
    pub stdevs: MaskedArray,
}

impl StatLayers {
    /// Pair values and stdevs, checking that their shapes agree.
    pub fn new(values: MaskedArray, stdevs: MaskedArray) -> Result<Self> {
        if values.shape() != stdevs.shape() {
            return Err(StatsError::axis_consistency(format!(
                "stdev shape {:?} differs from value shape {:?}",
                stdevs.shape(),
                values.shape()
            )));
        }
        Ok(Self { values, stdevs })
    }

    /// Shape shared by both layers.
    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// Apply the same shape-changing operation to both layers.
    pub fn map(&self, f: impl Fn(&MaskedArray) -> MaskedArray) -> Self {
        Self {
            values: f(&self.values),
            stdevs: f(&self.stdevs),
        }
    }

    /// Fallible variant of [`Self::map`].
    pub fn try_map(&self, f: impl Fn(&MaskedArray) -> Result<MaskedArray>) -> Result<Self> {
        Ok(Self {
            values: f(&self.values)?,
            stdevs: f(&self.stdevs)?,
        })
    }
}

/// Immutable dataset context shared by every plot request.
///
/// Built once at startup and only ever read afterwards.
#[derive(Debug, Clone)]
pub struct StatsDataset {
    /// Axis catalogs.
    pub catalog: AxisCatalog,
    /// Units of the raw values (a weekly rate).
    pub units: String,
    seasonal: StatLayers,
    monthly: StatLayers,
}

impl StatsDataset {
    /// Create a dataset, validating every array against the catalog.
    pub fn new(
        catalog: AxisCatalog,
        units: impl Into<String>,
        seasonal: StatLayers,
        monthly: StatLayers,
    ) -> Result<Self> {
        for (kind, layers) in [(ClimKind::Seasons, &seasonal), (ClimKind::Months, &monthly)] {
            let expected = catalog.shape(kind);
            if layers.shape() != expected {
                return Err(StatsError::axis_consistency(format!(
                    "{:?} arrays have shape {:?}, catalog expects {:?}",
                    kind,
                    layers.shape(),
                    expected
                )));
            }
        }

        Ok(Self {
            catalog,
            units: units.into(),
            seasonal,
            monthly,
        })
    }

    /// Arrays backing a climatology sub-catalog.
    pub fn layers(&self, clim: ClimKind) -> &StatLayers {
        match clim {
            ClimKind::Seasons => &self.seasonal,
            ClimKind::Months => &self.monthly,
        }
    }
}
