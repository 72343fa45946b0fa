//! Gathering the selected hyper-rectangle out of the raw stat arrays.

use super::{GatheredSlice, ResolvedSelection};
use crate::data::{AxisKind, MaskedArray, StatLayers, StatsDataset};
use crate::error::{Result, StatsError};

/// How model/scenario/year-range combinations without data are handled.
///
/// Climatology, latitude and longitude are always gathered densely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GatherPolicy {
    /// Full Cartesian product of the selection; empty combinations stay as
    /// masked cells.
    Dense,
    /// Only (model, scenario, year range) combinations with at least one
    /// present value are gathered; name lists follow first-seen order.
    #[default]
    Sparse,
}

/// Gather the resolved selection from the dataset.
///
/// The result is always a fresh copy; the dataset is never mutated.
pub fn gather(
    dataset: &StatsDataset,
    resolved: &ResolvedSelection,
    policy: GatherPolicy,
) -> Result<GatheredSlice> {
    let layers = dataset.layers(resolved.clim);
    let indices = AxisKind::ALL
        .iter()
        .map(|&axis| resolved.indices(&dataset.catalog, axis))
        .collect::<Result<Vec<_>>>()?;

    let slice = match policy {
        GatherPolicy::Dense => gather_dense(layers, resolved, &indices)?,
        GatherPolicy::Sparse => gather_sparse(layers, resolved, &indices)?,
    };

    if slice.count() == 0 {
        return Err(StatsError::empty_selection(
            "no data for the selected models, scenarios and year ranges",
        ));
    }

    tracing::debug!(
        "Gathered {:?} ({} present) with {:?} policy",
        slice.layers.shape(),
        slice.count(),
        policy
    );
    Ok(slice)
}

fn gather_dense(
    layers: &StatLayers,
    resolved: &ResolvedSelection,
    indices: &[Vec<usize>],
) -> Result<GatheredSlice> {
    let gathered = layers.map(|a| a.gather(indices));
    GatheredSlice::new(gathered, AxisKind::ALL.to_vec(), resolved.names.to_vec())
}

fn gather_sparse(
    layers: &StatLayers,
    resolved: &ResolvedSelection,
    indices: &[Vec<usize>],
) -> Result<GatheredSlice> {
    let inner = &indices[3..];

    // (model, scenario, year range) data indices in first-seen order
    let mut seen: [Vec<usize>; 3] = Default::default();
    let mut blocks = Vec::new();

    for &m in &indices[0] {
        for &s in &indices[1] {
            for &y in &indices[2] {
                let block = layers.map(|a| a.fixed(&[m, s, y]).gather(inner));
                if block.values.count() == 0 {
                    continue;
                }
                let position = [m, s, y]
                    .iter()
                    .zip(seen.iter_mut())
                    .map(|(&raw, list)| match list.iter().position(|&v| v == raw) {
                        Some(p) => p,
                        None => {
                            list.push(raw);
                            list.len() - 1
                        },
                    })
                    .collect::<Vec<_>>();
                blocks.push((position, block));
            }
        }
    }

    let mut shape: Vec<usize> = seen.iter().map(Vec::len).collect();
    shape.extend(inner.iter().map(Vec::len));

    let mut values = MaskedArray::masked(&shape);
    let mut stdevs = MaskedArray::masked(&shape);
    for (position, block) in &blocks {
        values.assign_at(position, &block.values)?;
        stdevs.assign_at(position, &block.stdevs)?;
    }

    // Translate the seen data indices back to names through the resolved lists,
    // which are parallel to `indices`.
    let mut names: Vec<Vec<String>> = seen
        .iter()
        .enumerate()
        .map(|(axis, raws)| {
            raws.iter()
                .map(|raw| {
                    let k = indices[axis].iter().position(|v| v == raw).unwrap_or_default();
                    resolved.names[axis][k].clone()
                })
                .collect()
        })
        .collect();
    names.extend(resolved.names[3..].iter().cloned());

    GatheredSlice::new(StatLayers::new(values, stdevs)?, AxisKind::ALL.to_vec(), names)
}
