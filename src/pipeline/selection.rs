//! User selections and their resolution into concrete category lists.

use super::YAxisMode;
use crate::data::{
    AxisCatalog, AxisKind, ClimKind, ALL, ALL_MONTHS, ALL_SEASONS, HISTORICAL, NUM_AXES,
};
use crate::error::{Result, StatsError};

/// What the user picked on one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every real category of the axis.
    All,
    /// A named group; only "all seasons" and "all months" on the climatology axis.
    Aggregate(String),
    /// An explicit list of category names, in the order given.
    Explicit(Vec<String>),
}

impl Selection {
    /// Parse a comma-separated selection as typed on the command line.
    ///
    /// `all` is the wildcard, `all seasons`/`all months` are aggregates and
    /// anything else is an explicit list.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed {
            ALL => Selection::All,
            ALL_SEASONS | ALL_MONTHS => Selection::Aggregate(trimmed.to_string()),
            _ => Selection::Explicit(
                trimmed
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        }
    }

    /// Build an explicit selection.
    pub fn explicit<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Explicit(names.into_iter().map(Into::into).collect())
    }
}

/// One selection per axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selections {
    /// Model selection.
    pub models: Selection,
    /// Scenario selection.
    pub scenarios: Selection,
    /// Year range selection.
    pub year_ranges: Selection,
    /// Season or month selection.
    pub clims: Selection,
    /// Latitude band selection.
    pub latitudes: Selection,
    /// Longitude band selection.
    pub longitudes: Selection,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            models: Selection::All,
            scenarios: Selection::All,
            year_ranges: Selection::All,
            clims: Selection::Aggregate(ALL_SEASONS.to_string()),
            latitudes: Selection::All,
            longitudes: Selection::All,
        }
    }
}

impl Selections {
    /// Selection for `axis`.
    pub fn get(&self, axis: AxisKind) -> &Selection {
        match axis {
            AxisKind::Model => &self.models,
            AxisKind::Scenario => &self.scenarios,
            AxisKind::YearRange => &self.year_ranges,
            AxisKind::Clim => &self.clims,
            AxisKind::Latitude => &self.latitudes,
            AxisKind::Longitude => &self.longitudes,
        }
    }

    /// Mutable selection for `axis`.
    pub fn get_mut(&mut self, axis: AxisKind) -> &mut Selection {
        match axis {
            AxisKind::Model => &mut self.models,
            AxisKind::Scenario => &mut self.scenarios,
            AxisKind::YearRange => &mut self.year_ranges,
            AxisKind::Clim => &mut self.clims,
            AxisKind::Latitude => &mut self.latitudes,
            AxisKind::Longitude => &mut self.longitudes,
        }
    }
}

/// Concrete, validated category names per axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection {
    /// Climatology sub-catalog the selection draws from; picks the raw arrays.
    pub clim: ClimKind,
    /// Names per axis in storage order.
    pub names: [Vec<String>; NUM_AXES],
}

impl ResolvedSelection {
    /// Names selected on `axis`.
    pub fn names(&self, axis: AxisKind) -> &[String] {
        &self.names[axis.index()]
    }

    /// Data indices of the selected names on `axis`.
    pub fn indices(&self, catalog: &AxisCatalog, axis: AxisKind) -> Result<Vec<usize>> {
        self.names(axis)
            .iter()
            .map(|name| catalog.index_of(axis, self.clim, name))
            .collect()
    }
}

/// Resolve every axis selection against the catalog.
///
/// In ratio mode "historical" is dropped from the scenarios, since it comes
/// back separately as the baseline.
pub fn resolve(
    catalog: &AxisCatalog,
    selections: &Selections,
    y_axis: YAxisMode,
) -> Result<ResolvedSelection> {
    let (clim, clim_names) = resolve_clim(catalog, &selections.clims)?;

    let mut names: [Vec<String>; NUM_AXES] = Default::default();
    for axis in AxisKind::ALL {
        names[axis.index()] = match axis {
            AxisKind::Clim => clim_names.clone(),
            other => resolve_axis(catalog, other, selections.get(other))?,
        };
    }

    if y_axis == YAxisMode::Ratio {
        let scenarios = &mut names[AxisKind::Scenario.index()];
        scenarios.retain(|s| s != HISTORICAL);
        if scenarios.is_empty() {
            return Err(StatsError::empty_selection(
                "ratio to historical needs at least one non-historical scenario",
            ));
        }
    }

    Ok(ResolvedSelection { clim, names })
}

fn resolve_axis(catalog: &AxisCatalog, axis: AxisKind, selection: &Selection) -> Result<Vec<String>> {
    let catalog_axis = catalog.axis(axis);
    match selection {
        Selection::All => Ok(catalog_axis.names().to_vec()),
        Selection::Aggregate(token) => Err(StatsError::invalid_selection(format!(
            "'{}' is only valid for climatology periods, not {}",
            token, axis
        ))),
        Selection::Explicit(list) if list.iter().any(|n| n == ALL) => {
            Ok(catalog_axis.names().to_vec())
        },
        Selection::Explicit(list) => {
            let list = dedup(list);
            if list.is_empty() {
                return Err(StatsError::invalid_selection(format!("no {} selected", axis)));
            }
            if let Some(unknown) = list.iter().find(|n| !catalog_axis.contains(n)) {
                return Err(StatsError::invalid_selection(format!(
                    "unknown {} category '{}'",
                    axis, unknown
                )));
            }
            Ok(list)
        },
    }
}

fn resolve_clim(catalog: &AxisCatalog, selection: &Selection) -> Result<(ClimKind, Vec<String>)> {
    let aggregate = |token: &str| match token {
        ALL_SEASONS => Ok((ClimKind::Seasons, catalog.seasons.names().to_vec())),
        ALL_MONTHS => Ok((ClimKind::Months, catalog.months.names().to_vec())),
        other => Err(StatsError::invalid_selection(format!(
            "unknown climatology aggregate '{}'",
            other
        ))),
    };

    match selection {
        Selection::All => aggregate(ALL_SEASONS),
        Selection::Aggregate(token) => aggregate(token.as_str()),
        Selection::Explicit(list) => {
            let list = dedup(list);
            if let [only] = list.as_slice() {
                if only == ALL_SEASONS || only == ALL_MONTHS {
                    return aggregate(only.as_str());
                }
            }
            if list.is_empty() {
                return Err(StatsError::invalid_selection("no climatology period selected"));
            }
            if list.iter().any(|n| n == ALL_SEASONS || n == ALL_MONTHS) {
                return Err(StatsError::invalid_selection(
                    "'all seasons' and 'all months' must be selected alone",
                ));
            }

            let in_seasons = list.iter().all(|n| catalog.seasons.contains(n));
            let in_months = list.iter().all(|n| catalog.months.contains(n));
            if in_seasons {
                Ok((ClimKind::Seasons, list))
            } else if in_months {
                Ok((ClimKind::Months, list))
            } else if let Some(unknown) = list
                .iter()
                .find(|n| !catalog.seasons.contains(n) && !catalog.months.contains(n))
            {
                Err(StatsError::invalid_selection(format!(
                    "unknown climatology period '{}'",
                    unknown
                )))
            } else {
                Err(StatsError::invalid_selection(
                    "selecting a mix of months and seasons is forbidden",
                ))
            }
        },
    }
}

fn dedup(list: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(list.len());
    for name in list {
        if !out.contains(name) {
            out.push(name.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::toy_catalog;

    #[test]
    fn wildcard_expands_in_catalog_order() {
        let catalog = toy_catalog();
        let resolved = resolve(&catalog, &Selections::default(), YAxisMode::Values).unwrap();
        assert_eq!(resolved.names(AxisKind::Model), ["A", "B"]);
        assert_eq!(resolved.names(AxisKind::Scenario), ["historical", "rcp85"]);
        assert_eq!(resolved.clim, ClimKind::Seasons);
        assert_eq!(resolved.names(AxisKind::Clim), ["DJF", "JJA"]);
    }

    #[test]
    fn all_months_switches_sub_catalog() {
        let catalog = toy_catalog();
        let selections = Selections {
            clims: Selection::parse("all months"),
            ..Selections::default()
        };
        let resolved = resolve(&catalog, &selections, YAxisMode::Values).unwrap();
        assert_eq!(resolved.clim, ClimKind::Months);
        assert_eq!(resolved.names(AxisKind::Clim), ["Jan", "Jul"]);
    }

    #[test]
    fn explicit_months_are_resolved_as_months() {
        let catalog = toy_catalog();
        let selections = Selections {
            clims: Selection::explicit(["Jul"]),
            ..Selections::default()
        };
        let resolved = resolve(&catalog, &selections, YAxisMode::Values).unwrap();
        assert_eq!(resolved.clim, ClimKind::Months);
        assert_eq!(resolved.indices(&catalog, AxisKind::Clim).unwrap(), vec![1]);
    }

    #[test]
    fn mixing_seasons_and_months_is_rejected() {
        let catalog = toy_catalog();
        let selections = Selections {
            clims: Selection::explicit(["DJF", "Jan"]),
            ..Selections::default()
        };
        assert!(matches!(
            resolve(&catalog, &selections, YAxisMode::Values),
            Err(StatsError::InvalidSelection(_))
        ));
    }

    #[test]
    fn ratio_mode_drops_historical() {
        let catalog = toy_catalog();
        let resolved = resolve(&catalog, &Selections::default(), YAxisMode::Ratio).unwrap();
        assert_eq!(resolved.names(AxisKind::Scenario), ["rcp85"]);

        // no-op when historical was not selected
        let selections = Selections {
            scenarios: Selection::explicit(["rcp85"]),
            ..Selections::default()
        };
        let resolved = resolve(&catalog, &selections, YAxisMode::Ratio).unwrap();
        assert_eq!(resolved.names(AxisKind::Scenario), ["rcp85"]);
    }

    #[test]
    fn ratio_mode_with_only_historical_is_empty() {
        let catalog = toy_catalog();
        let selections = Selections {
            scenarios: Selection::explicit(["historical"]),
            ..Selections::default()
        };
        assert!(matches!(
            resolve(&catalog, &selections, YAxisMode::Ratio),
            Err(StatsError::EmptySelection(_))
        ));
    }

    #[test]
    fn aggregate_outside_climatology_is_rejected() {
        let catalog = toy_catalog();
        let selections = Selections {
            models: Selection::Aggregate(ALL_SEASONS.to_string()),
            ..Selections::default()
        };
        assert!(matches!(
            resolve(&catalog, &selections, YAxisMode::Values),
            Err(StatsError::InvalidSelection(_))
        ));
    }

    #[test]
    fn unknown_names_are_rejected() {
        let catalog = toy_catalog();
        let selections = Selections {
            models: Selection::parse("A,Z"),
            ..Selections::default()
        };
        assert!(matches!(
            resolve(&catalog, &selections, YAxisMode::Values),
            Err(StatsError::InvalidSelection(_))
        ));
    }

    #[test]
    fn parse_tokens() {
        assert_eq!(Selection::parse("all"), Selection::All);
        assert_eq!(
            Selection::parse("all months"),
            Selection::Aggregate("all months".to_string())
        );
        assert_eq!(Selection::parse("A, B"), Selection::explicit(["A", "B"]));
    }
}
