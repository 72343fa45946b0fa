//! Axis catalogs: ordered category names for each of the six stat axes.

use crate::error::{Result, StatsError};
use std::fmt;

/// Synthetic wildcard entry shown at position 0 of axes that support it.
pub const ALL: &str = "all";
/// Aggregate climatology entry selecting every season.
pub const ALL_SEASONS: &str = "all seasons";
/// Aggregate climatology entry selecting every month.
pub const ALL_MONTHS: &str = "all months";
/// Scenario used as the baseline in ratio mode.
pub const HISTORICAL: &str = "historical";

/// Number of axes of a stat array.
pub const NUM_AXES: usize = 6;

/// One of the six dimensions of a stat array, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum AxisKind {
    /// Climate model.
    #[value(name = "models")]
    Model,
    /// Emission scenario.
    #[value(name = "scenarios")]
    Scenario,
    /// Year range of the climatology.
    #[value(name = "years")]
    YearRange,
    /// Season or month.
    #[value(name = "climatology")]
    Clim,
    /// Latitude band.
    Latitude,
    /// Longitude band.
    Longitude,
}

impl AxisKind {
    /// All axes in storage order.
    pub const ALL: [AxisKind; NUM_AXES] = [
        AxisKind::Model,
        AxisKind::Scenario,
        AxisKind::YearRange,
        AxisKind::Clim,
        AxisKind::Latitude,
        AxisKind::Longitude,
    ];

    /// Position of this axis in a stat array.
    pub fn index(self) -> usize {
        match self {
            AxisKind::Model => 0,
            AxisKind::Scenario => 1,
            AxisKind::YearRange => 2,
            AxisKind::Clim => 3,
            AxisKind::Latitude => 4,
            AxisKind::Longitude => 5,
        }
    }

    /// Get the next axis in cycle.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % NUM_AXES]
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            AxisKind::Model => "models",
            AxisKind::Scenario => "scenarios",
            AxisKind::YearRange => "years",
            AxisKind::Clim => "climatology time",
            AxisKind::Latitude => "latitude",
            AxisKind::Longitude => "longitude",
        }
    }
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which climatology sub-catalog a selection draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClimKind {
    /// Seasonal climatologies.
    Seasons,
    /// Monthly climatologies.
    Months,
}

/// Ordered category names of one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    names: Vec<String>,
}

impl Axis {
    /// Create an axis from its real category names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Real category names, without the wildcard.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of real categories.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the axis has no categories.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries as shown to the user: the wildcard followed by every category.
    pub fn entries(&self) -> Vec<String> {
        std::iter::once(ALL.to_string())
            .chain(self.names.iter().cloned())
            .collect()
    }

    /// Data index of `name`.
    ///
    /// This is the entry index minus one, since the wildcard occupies entry 0.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Whether `name` is a real category.
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }
}

/// Category catalogs for every axis of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisCatalog {
    /// Climate models.
    pub models: Axis,
    /// Scenarios, including the historical baseline.
    pub scenarios: Axis,
    /// Year ranges.
    pub year_ranges: Axis,
    /// Season names.
    pub seasons: Axis,
    /// Month names.
    pub months: Axis,
    /// Latitude band labels.
    pub latitudes: Axis,
    /// Longitude band labels.
    pub longitudes: Axis,
}

impl AxisCatalog {
    /// Catalog for a non-climatology axis.
    ///
    /// The climatology axis has two sub-catalogs; use [`Self::clim`] for it.
    pub fn axis(&self, kind: AxisKind) -> &Axis {
        match kind {
            AxisKind::Model => &self.models,
            AxisKind::Scenario => &self.scenarios,
            AxisKind::YearRange => &self.year_ranges,
            AxisKind::Clim => &self.seasons,
            AxisKind::Latitude => &self.latitudes,
            AxisKind::Longitude => &self.longitudes,
        }
    }

    /// Climatology sub-catalog.
    pub fn clim(&self, kind: ClimKind) -> &Axis {
        match kind {
            ClimKind::Seasons => &self.seasons,
            ClimKind::Months => &self.months,
        }
    }

    /// Climatology entries as shown to the user.
    pub fn clim_entries(&self) -> Vec<String> {
        [ALL_SEASONS.to_string(), ALL_MONTHS.to_string()]
            .into_iter()
            .chain(self.seasons.names().iter().cloned())
            .chain(self.months.names().iter().cloned())
            .collect()
    }

    /// Entries shown for `kind`, including wildcard or aggregate tokens.
    pub fn entries(&self, kind: AxisKind) -> Vec<String> {
        match kind {
            AxisKind::Clim => self.clim_entries(),
            other => self.axis(other).entries(),
        }
    }

    /// Expected stat array shape for a climatology sub-catalog.
    pub fn shape(&self, clim: ClimKind) -> [usize; NUM_AXES] {
        [
            self.models.len(),
            self.scenarios.len(),
            self.year_ranges.len(),
            self.clim(clim).len(),
            self.latitudes.len(),
            self.longitudes.len(),
        ]
    }

    /// Data index of `name` on `axis`, using the given climatology sub-catalog.
    pub fn index_of(&self, axis: AxisKind, clim: ClimKind, name: &str) -> Result<usize> {
        let catalog = match axis {
            AxisKind::Clim => self.clim(clim),
            other => self.axis(other),
        };
        catalog.index_of(name).ok_or_else(|| {
            StatsError::invalid_selection(format!("unknown {} category '{}'", axis, name))
        })
    }
}

/// Human-readable band label for a pair of latitude or longitude bounds.
///
/// Each bound is printed as its magnitude followed by a hemisphere letter,
/// e.g. `(-20.0, 40.0)` on latitude gives `20S-40N`.
pub fn band_label(bounds: (f64, f64), latitude: bool) -> String {
    let (pos, neg) = if latitude { ('N', 'S') } else { ('E', 'W') };
    let fmt_bound = |b: f64| {
        let hemisphere = if b < 0.0 { neg } else { pos };
        format!("{}{}", b.abs(), hemisphere)
    };
    format!("{}-{}", fmt_bound(bounds.0), fmt_bound(bounds.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_is_entry_zero() {
        let axis = Axis::new(["CCSM4", "MIROC5"]);
        assert_eq!(axis.entries(), vec!["all", "CCSM4", "MIROC5"]);
        // data index = entry index - 1
        assert_eq!(axis.index_of("MIROC5"), Some(1));
        assert_eq!(axis.index_of(ALL), None);
    }

    #[test]
    fn band_labels() {
        assert_eq!(band_label((10.0, 20.0), true), "10N-20N");
        assert_eq!(band_label((-20.0, 0.0), true), "20S-0N");
        assert_eq!(band_label((-120.0, -60.0), false), "120W-60W");
        assert_eq!(band_label((22.5, 45.0), false), "22.5E-45E");
    }

    #[test]
    fn unknown_name_is_invalid_selection() {
        let catalog = AxisCatalog {
            models: Axis::new(["A"]),
            scenarios: Axis::new(["historical"]),
            year_ranges: Axis::new(["1976-2005"]),
            seasons: Axis::new(["DJF"]),
            months: Axis::new(["Jan"]),
            latitudes: Axis::new(["0N-10N"]),
            longitudes: Axis::new(["0E-10E"]),
        };
        assert_eq!(catalog.index_of(AxisKind::Clim, ClimKind::Months, "Jan").unwrap(), 0);
        assert!(matches!(
            catalog.index_of(AxisKind::Model, ClimKind::Seasons, "B"),
            Err(StatsError::InvalidSelection(_))
        ));
        assert_eq!(catalog.clim_entries()[..2], ["all seasons", "all months"]);
    }
}
