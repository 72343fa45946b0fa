//! Moving the x-axis last and flattening the rest into bar groups.

use super::GatheredSlice;
use crate::data::{AxisKind, MaskedArray};
use crate::error::Result;

/// A slice flattened to bar-group rows and x-axis columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Reordered {
    /// Values, shaped `(rows, x)`.
    pub values: MaskedArray,
    /// Stdevs, shaped like `values`.
    pub stdevs: MaskedArray,
    /// Axes that were flattened into rows, in their original relative order.
    pub bar_axes: Vec<AxisKind>,
    /// Category names of each bar axis.
    pub bar_names: Vec<Vec<String>>,
    /// For each row, its index into every bar axis's names.
    pub rows: Vec<Vec<usize>>,
    /// The axis shown along x.
    pub x_axis: AxisKind,
    /// Names along x, one per column.
    pub x_labels: Vec<String>,
}

impl Reordered {
    /// Number of rows (bar groups).
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of x positions.
    pub fn num_cols(&self) -> usize {
        self.x_labels.len()
    }
}

/// Axis order with `x_axis` moved last and the others kept in order.
pub fn permutation(slice: &GatheredSlice, x_axis: AxisKind) -> Result<Vec<usize>> {
    let x = slice.position(x_axis)?;
    let mut perm: Vec<usize> = (0..slice.axes.len()).filter(|&d| d != x).collect();
    perm.push(x);
    Ok(perm)
}

/// Permutation undoing `perm`.
pub fn inverse_permutation(perm: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inverse[p] = i;
    }
    inverse
}

/// Reorder the axes of `slice` so that output dimension `i` is input `perm[i]`.
pub fn permute(slice: &GatheredSlice, perm: &[usize]) -> Result<GatheredSlice> {
    let layers = slice.layers.map(|a| a.permuted(perm));
    let axes = perm.iter().map(|&d| slice.axes[d]).collect();
    let names = perm.iter().map(|&d| slice.names[d].clone()).collect();
    GatheredSlice::new(layers, axes, names)
}

/// Move `x_axis` last and flatten the leading axes row-major, the first
/// remaining axis varying slowest.
pub fn reorder(slice: &GatheredSlice, x_axis: AxisKind) -> Result<Reordered> {
    let perm = permutation(slice, x_axis)?;
    let permuted = permute(slice, &perm)?;

    let last = permuted.axes.len() - 1;
    let lens: Vec<usize> = permuted.names[..last].iter().map(Vec::len).collect();
    let num_rows: usize = lens.iter().product();
    let num_cols = permuted.names[last].len();

    let flat = permuted.layers.try_map(|a| a.reshaped(&[num_rows, num_cols]))?;

    Ok(Reordered {
        values: flat.values,
        stdevs: flat.stdevs,
        bar_axes: permuted.axes[..last].to_vec(),
        bar_names: permuted.names[..last].to_vec(),
        rows: row_major_indices(&lens),
        x_axis,
        x_labels: permuted.names[last].clone(),
    })
}

/// Every index tuple over `lens`, the first position varying slowest.
fn row_major_indices(lens: &[usize]) -> Vec<Vec<usize>> {
    let mut tuples = vec![Vec::with_capacity(lens.len())];
    for &len in lens {
        tuples = tuples
            .into_iter()
            .flat_map(|prefix| {
                (0..len).map(move |i| {
                    let mut tuple = prefix.clone();
                    tuple.push(i);
                    tuple
                })
            })
            .collect();
    }
    tuples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StatLayers;
    use ndarray::{ArrayD, IxDyn};

    fn names(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}{}", prefix, i)).collect()
    }

    /// model(2) x scenario(3) x clim(2), value = 100m + 10s + c
    fn slice() -> GatheredSlice {
        let values = ArrayD::from_shape_fn(IxDyn(&[2, 3, 2]), |ix| {
            (100 * ix[0] + 10 * ix[1] + ix[2]) as f64
        });
        let values = MaskedArray::from_values(values);
        GatheredSlice::new(
            StatLayers::new(values.clone(), values.scaled(0.5)).unwrap(),
            vec![AxisKind::Model, AxisKind::Scenario, AxisKind::Clim],
            vec![names("m", 2), names("s", 3), names("c", 2)],
        )
        .unwrap()
    }

    #[test]
    fn x_axis_moves_last() {
        let r = reorder(&slice(), AxisKind::Scenario).unwrap();
        assert_eq!(r.bar_axes, vec![AxisKind::Model, AxisKind::Clim]);
        assert_eq!(r.x_labels, names("s", 3));
        assert_eq!(r.values.shape(), &[4, 3]);
        // rows: (m0,c0) (m0,c1) (m1,c0) (m1,c1)
        assert_eq!(r.rows, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
        assert_eq!(r.values.get(&[1, 2]), Some(21.0));
        assert_eq!(r.values.get(&[2, 1]), Some(110.0));
        assert_eq!(r.stdevs.get(&[2, 1]), Some(55.0));
    }

    #[test]
    fn permutation_round_trips() {
        let original = slice();
        for x in [AxisKind::Model, AxisKind::Scenario, AxisKind::Clim] {
            let perm = permutation(&original, x).unwrap();
            let there = permute(&original, &perm).unwrap();
            assert_eq!(*there.axes.last().unwrap(), x);
            let back = permute(&there, &inverse_permutation(&perm)).unwrap();
            assert_eq!(back, original);
            assert_eq!(back.layers.values.values(), original.layers.values.values());
        }
    }

    #[test]
    fn row_major_order() {
        assert_eq!(row_major_indices(&[]), vec![Vec::<usize>::new()]);
        assert_eq!(
            row_major_indices(&[2, 2]),
            vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]
        );
        assert!(row_major_indices(&[3, 0]).is_empty());
    }
}
