//! Ratio-to-historical normalization.

use super::{GatheredSlice, ResolvedSelection};
use crate::data::{AxisKind, MaskedArray, StatLayers, StatsDataset, HISTORICAL};
use crate::error::{Result, StatsError};

/// Gather the historical baseline matching `primary`.
///
/// The baseline shares the model, climatology, latitude and longitude names of
/// `primary`, while its scenario and year-range axes have length 1. For every
/// model the first year range (catalog order) with any historical data is the
/// representative; models without historical data get a fully masked row.
pub fn gather_baseline(
    primary: &GatheredSlice,
    dataset: &StatsDataset,
    resolved: &ResolvedSelection,
) -> Result<GatheredSlice> {
    let catalog = &dataset.catalog;
    let layers = dataset.layers(resolved.clim);
    let historical = catalog.scenarios.index_of(HISTORICAL).ok_or_else(|| {
        StatsError::baseline_mismatch("the dataset has no historical scenario")
    })?;

    let models = primary.names_of(AxisKind::Model)?;
    let inner = [AxisKind::Clim, AxisKind::Latitude, AxisKind::Longitude]
        .iter()
        .map(|&axis| resolved.indices(catalog, axis))
        .collect::<Result<Vec<_>>>()?;

    let mut shape = vec![models.len(), 1, 1];
    shape.extend(inner.iter().map(Vec::len));
    let mut values = MaskedArray::masked(&shape);
    let mut stdevs = MaskedArray::masked(&shape);
    let mut representatives: Vec<String> = Vec::new();

    for (row, model) in models.iter().enumerate() {
        let m = catalog.index_of(AxisKind::Model, resolved.clim, model)?;

        let with_data: Vec<usize> = (0..catalog.year_ranges.len())
            .filter(|&y| layers.values.fixed(&[m, historical, y]).count() > 0)
            .collect();
        let Some(&y) = with_data.first() else {
            tracing::debug!("No historical data for model {}", model);
            continue;
        };
        if with_data.len() > 1 {
            tracing::debug!(
                "Model {} has historical data in {} year ranges, using the first",
                model,
                with_data.len()
            );
        }

        let block = layers.map(|a| a.fixed(&[m, historical, y]).gather(&inner));
        values.assign_at(&[row, 0, 0], &block.values)?;
        stdevs.assign_at(&[row, 0, 0], &block.stdevs)?;

        let range = &catalog.year_ranges.names()[y];
        if !representatives.contains(range) {
            representatives.push(range.clone());
        }
    }

    if representatives.is_empty() {
        return Err(StatsError::baseline_mismatch(format!(
            "no historical data for {}",
            models.join(", ")
        )));
    }

    let mut names = vec![
        models.to_vec(),
        vec![HISTORICAL.to_string()],
        vec![representatives.join(",")],
    ];
    names.extend(primary.names[3..].iter().cloned());
    GatheredSlice::new(StatLayers::new(values, stdevs)?, AxisKind::ALL.to_vec(), names)
}

/// Divide `primary` by `baseline`, broadcasting over the baseline's length-1
/// scenario and year-range axes.
///
/// Stdevs are divided by the baseline values, so they stay relative to the
/// plotted ratio.
pub fn divide(primary: &GatheredSlice, baseline: &GatheredSlice) -> Result<GatheredSlice> {
    for (dim, axis) in primary.axes.iter().enumerate() {
        if matches!(axis, AxisKind::Scenario | AxisKind::YearRange) {
            continue;
        }
        if baseline.names.get(dim) != Some(&primary.names[dim]) {
            return Err(StatsError::axis_consistency(format!(
                "baseline {} names {:?} differ from {:?}",
                axis,
                baseline.names.get(dim),
                primary.names[dim]
            )));
        }
    }

    let divisor = &baseline.layers.values;
    let layers = primary
        .layers
        .try_map(|a| a.divide_broadcast(divisor))?;
    GatheredSlice::new(layers, primary.axes.clone(), primary.names.clone())
}

/// Gather the baseline for `primary` and divide by it.
pub fn normalize(
    primary: &GatheredSlice,
    dataset: &StatsDataset,
    resolved: &ResolvedSelection,
) -> Result<GatheredSlice> {
    let baseline = gather_baseline(primary, dataset, resolved)?;
    divide(primary, &baseline)
}
