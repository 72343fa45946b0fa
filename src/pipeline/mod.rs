//! Selection-to-plot reduction pipeline.
//!
//! Each stage takes a [`GatheredSlice`] and returns a new one; the dataset is
//! never modified. The stages run as
//! resolve → gather → unit scaling → baseline (ratio mode) → model/spatial
//! mean → divide → reorder → compact → labels. The baseline is reduced the
//! same way as the primary slice before the division.

mod baseline;
mod compact;
mod gather;
mod labels;
mod reorder;
mod selection;
mod slice;
mod spatial;

#[cfg(test)]
pub(crate) mod testing;

pub use baseline::{divide, gather_baseline, normalize};
pub use compact::compact;
pub use gather::{gather, GatherPolicy};
pub use labels::{build as build_labels, title, Labels};
pub use reorder::{inverse_permutation, permutation, permute, reorder, Reordered};
pub use selection::{resolve, ResolvedSelection, Selection, Selections};
pub use slice::GatheredSlice;
pub use spatial::{
    is_mean_label, mean_over, reduce, reduce_models, SpatialMean, LAT_MEAN, LON_MEAN, MODEL_MEAN,
};

use crate::data::{AxisKind, MaskedArray, StatsDataset};
use crate::error::{Result, StatsError};

/// What the bar heights represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum YAxisMode {
    /// Raw statistic values.
    #[default]
    Values,
    /// Future values divided by the historical baseline.
    Ratio,
}

impl YAxisMode {
    /// Get the next mode in cycle.
    pub fn next(self) -> Self {
        match self {
            YAxisMode::Values => YAxisMode::Ratio,
            YAxisMode::Ratio => YAxisMode::Values,
        }
    }

    /// Get display name, as used in the chart title.
    pub fn label(self) -> &'static str {
        match self {
            YAxisMode::Values => "values",
            YAxisMode::Ratio => "ratio to historical",
        }
    }
}

/// Rate the raw weekly values are converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum YUnit {
    /// Per week, as stored.
    #[default]
    #[value(name = "week")]
    PerWeek,
    /// Per average month.
    #[value(name = "month")]
    PerAvgMonth,
    /// Per average season.
    #[value(name = "season")]
    PerAvgSeason,
    /// Per average year.
    #[value(name = "year")]
    PerAvgYear,
}

/// Days in an average year.
const DAYS_PER_YEAR: f64 = 365.25;

impl YUnit {
    /// Get the next unit in cycle.
    pub fn next(self) -> Self {
        match self {
            YUnit::PerWeek => YUnit::PerAvgMonth,
            YUnit::PerAvgMonth => YUnit::PerAvgSeason,
            YUnit::PerAvgSeason => YUnit::PerAvgYear,
            YUnit::PerAvgYear => YUnit::PerWeek,
        }
    }

    /// Multiplier from a weekly rate.
    pub fn factor(self) -> f64 {
        match self {
            YUnit::PerWeek => 1.0,
            YUnit::PerAvgMonth => DAYS_PER_YEAR / 7.0 / 12.0,
            YUnit::PerAvgSeason => DAYS_PER_YEAR / 7.0 / 4.0,
            YUnit::PerAvgYear => DAYS_PER_YEAR / 7.0,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            YUnit::PerWeek => "per week",
            YUnit::PerAvgMonth => "per avg month",
            YUnit::PerAvgSeason => "per avg season",
            YUnit::PerAvgYear => "per avg year",
        }
    }
}

/// Everything a redraw asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    /// Per-axis selections.
    pub selections: Selections,
    /// Axis shown along x.
    pub x_axis: AxisKind,
    /// Values or ratio to historical.
    pub y_axis: YAxisMode,
    /// Rate unit for values mode.
    pub y_unit: YUnit,
    /// Spatial averaging.
    pub spatial_mean: SpatialMean,
    /// Average over the selected models.
    pub model_mean: bool,
    /// How model/scenario/year-range combinations without data are handled.
    pub policy: GatherPolicy,
}

impl Default for PlotRequest {
    fn default() -> Self {
        Self {
            selections: Selections::default(),
            x_axis: AxisKind::Clim,
            y_axis: YAxisMode::default(),
            y_unit: YUnit::default(),
            spatial_mean: SpatialMean::default(),
            model_mean: false,
            policy: GatherPolicy::default(),
        }
    }
}

/// Final chart input.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotResult {
    /// Bar heights, shaped `(bar groups, x positions)`.
    pub values: MaskedArray,
    /// Stdevs, shaped like `values`.
    pub stdevs: MaskedArray,
    /// Legend entries, or `None` for a single bar group.
    pub bar_labels: Option<Vec<String>>,
    /// Labels along x.
    pub x_labels: Vec<String>,
    /// Axis shown along x.
    pub x_axis: AxisKind,
    /// Y-axis unit string.
    pub y_unit: String,
    /// Multi-line chart title.
    pub title: String,
}

impl PlotResult {
    /// Number of bar groups (legend entries).
    pub fn num_bars(&self) -> usize {
        self.values.shape()[0]
    }

    /// Number of x positions.
    pub fn num_groups(&self) -> usize {
        self.values.shape()[1]
    }

    /// Value of bar `bar` at x position `x`, if present.
    pub fn value(&self, bar: usize, x: usize) -> Option<f64> {
        self.values.get(&[bar, x])
    }

    /// Stdev of bar `bar` at x position `x`, if present.
    pub fn stdev(&self, bar: usize, x: usize) -> Option<f64> {
        self.stdevs.get(&[bar, x])
    }

    /// Tab-separated table: a commented title and unit, a header of x labels,
    /// then one row per bar group. Absent cells are empty.
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        for line in self.title.lines() {
            out.push_str("# ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&format!("# unit: {}\n", self.y_unit));

        out.push_str(self.x_axis.name());
        for label in &self.x_labels {
            out.push('\t');
            out.push_str(label);
        }
        out.push('\n');

        for bar in 0..self.num_bars() {
            let name = match &self.bar_labels {
                Some(labels) => labels[bar].as_str(),
                None => "",
            };
            out.push_str(name);
            for x in 0..self.num_groups() {
                out.push('\t');
                if let Some(v) = self.value(bar, x) {
                    out.push_str(&v.to_string());
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Run one full pipeline pass.
pub fn compute_plot(dataset: &StatsDataset, request: &PlotRequest) -> Result<PlotResult> {
    let resolved = resolve(&dataset.catalog, &request.selections, request.y_axis)?;
    let mut primary = gather(dataset, &resolved, request.policy)?;

    if request.y_axis == YAxisMode::Values && request.y_unit != YUnit::PerWeek {
        let factor = request.y_unit.factor();
        primary.layers = primary.layers.map(|a| a.scaled(factor));
    }

    let mut baseline = match request.y_axis {
        YAxisMode::Values => None,
        YAxisMode::Ratio => Some(gather_baseline(&primary, dataset, &resolved)?),
    };

    let mut tails = Vec::new();
    if request.model_mean {
        let (reduced, tail) = reduce_models(&primary)?;
        primary = reduced;
        tails.push(tail);
        if let Some(base) = baseline.as_mut() {
            *base = reduce_models(base)?.0;
        }
    }
    let (reduced, spatial_tails) = reduce(&primary, request.spatial_mean)?;
    primary = reduced;
    tails.extend(spatial_tails);
    if let Some(base) = baseline.as_mut() {
        *base = reduce(base, request.spatial_mean)?.0;
    }

    if let Some(base) = &baseline {
        primary = divide(&primary, base)?;
    }
    tracing::debug!("Reduced slice {:?}", primary.layers.shape());

    let reordered = reorder(&primary, request.x_axis)?;
    let compacted = compact(&reordered);
    if compacted.num_rows() == 0 || compacted.num_cols() == 0 {
        return Err(StatsError::empty_selection("no data left to plot"));
    }
    tracing::debug!(
        "Compacted {:?} to {:?}",
        reordered.values.shape(),
        compacted.values.shape()
    );

    let labels = build_labels(&compacted, &tails, request.y_axis)?;
    debug_assert_eq!(compacted.values.shape(), &[compacted.num_rows(), labels.x_labels.len()]);
    debug_assert!(labels
        .bar_labels
        .as_ref()
        .map_or(true, |l| l.len() == compacted.num_rows()));

    let y_unit = match request.y_axis {
        YAxisMode::Values => format!("{} {}", dataset.units, request.y_unit.name()),
        YAxisMode::Ratio => "future/historical".to_string(),
    };

    Ok(PlotResult {
        values: compacted.values,
        stdevs: compacted.stdevs,
        bar_labels: labels.bar_labels,
        x_labels: labels.x_labels,
        x_axis: request.x_axis,
        y_unit,
        title: labels.title,
    })
}
