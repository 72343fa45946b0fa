//! Stripping bar groups and x positions that have no data at all.

use super::reorder::Reordered;
use crate::data::MaskedArray;

/// Drop every row and column without a present value.
///
/// Bar-axis name lists are narrowed to the names still used by a surviving
/// row, and row index tuples are remapped to match. Dropping an all-absent
/// column never empties a row and vice versa, so one pass is a fixed point.
pub fn compact(reordered: &Reordered) -> Reordered {
    let keep_rows: Vec<bool> = reordered
        .values
        .present_counts(0)
        .into_iter()
        .map(|n| n > 0)
        .collect();
    let keep_cols: Vec<bool> = reordered
        .values
        .present_counts(1)
        .into_iter()
        .map(|n| n > 0)
        .collect();

    let shrink = |a: &MaskedArray| a.compress(0, &keep_rows).compress(1, &keep_cols);
    let values = shrink(&reordered.values);
    let stdevs = shrink(&reordered.stdevs);

    let x_labels = reordered
        .x_labels
        .iter()
        .zip(&keep_cols)
        .filter(|(_, &keep)| keep)
        .map(|(label, _)| label.clone())
        .collect();

    let rows: Vec<&Vec<usize>> = reordered
        .rows
        .iter()
        .zip(&keep_rows)
        .filter(|(_, &keep)| keep)
        .map(|(row, _)| row)
        .collect();

    // For each bar axis, the surviving names and old index -> new index.
    let mut bar_names = Vec::with_capacity(reordered.bar_names.len());
    let mut remaps = Vec::with_capacity(reordered.bar_names.len());
    for (dim, names) in reordered.bar_names.iter().enumerate() {
        let used: Vec<bool> = (0..names.len())
            .map(|i| rows.iter().any(|row| row[dim] == i))
            .collect();
        let mut remap = vec![None; names.len()];
        let mut kept = Vec::new();
        for (i, name) in names.iter().enumerate() {
            if used[i] {
                remap[i] = Some(kept.len());
                kept.push(name.clone());
            }
        }
        bar_names.push(kept);
        remaps.push(remap);
    }

    let rows = rows
        .into_iter()
        .map(|row| {
            row.iter()
                .zip(&remaps)
                .map(|(&i, remap)| remap[i].unwrap_or_default())
                .collect()
        })
        .collect();

    Reordered {
        values,
        stdevs,
        bar_axes: reordered.bar_axes.clone(),
        bar_names,
        rows,
        x_axis: reordered.x_axis,
        x_labels,
    }
}
