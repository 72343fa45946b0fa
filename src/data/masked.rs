//! Masked N-dimensional arrays.
//!
//! Missing cells are tracked with an explicit presence array of the same shape
//! as the values, so counting and averaging never depend on sentinel values.

use crate::error::{Result, StatsError};
use ndarray::{ArrayD, Axis, Dimension, IxDyn, Zip};

/// A value array paired with a boolean presence array.
///
/// Absent cells hold `NaN` in `values` so that accidental reads are obvious,
/// but presence is always decided by `present`.
#[derive(Debug, Clone)]
pub struct MaskedArray {
    values: ArrayD<f64>,
    present: ArrayD<bool>,
}

/// Two masked arrays are equal when they have the same presence pattern and
/// the same present values; absent cells never compare.
impl PartialEq for MaskedArray {
    fn eq(&self, other: &Self) -> bool {
        self.present == other.present
            && Zip::from(&self.values)
                .and(&other.values)
                .and(&self.present)
                .all(|&a, &b, &p| !p || a == b)
    }
}

impl MaskedArray {
    /// Pair values with a presence mask of identical shape.
    pub fn new(values: ArrayD<f64>, present: ArrayD<bool>) -> Result<Self> {
        if values.shape() != present.shape() {
            return Err(StatsError::axis_consistency(format!(
                "values shape {:?} does not match mask shape {:?}",
                values.shape(),
                present.shape()
            )));
        }
        let values = Zip::from(&values)
            .and(&present)
            .map_collect(|&v, &p| if p { v } else { f64::NAN });
        Ok(Self { values, present })
    }

    /// Build from raw values, treating non-finite cells as absent.
    pub fn from_values(values: ArrayD<f64>) -> Self {
        let present = values.mapv(f64::is_finite);
        Self { values, present }
    }

    /// Build from raw values, treating non-finite cells and `fill` as absent.
    pub fn from_values_with_fill(values: ArrayD<f64>, fill: Option<f64>) -> Self {
        let present = values.mapv(|v| v.is_finite() && Some(v) != fill);
        let values = Zip::from(&values)
            .and(&present)
            .map_collect(|&v, &p| if p { v } else { f64::NAN });
        Self { values, present }
    }

    /// An array of the given shape with every cell absent.
    pub fn masked(shape: &[usize]) -> Self {
        Self {
            values: ArrayD::from_elem(IxDyn(shape), f64::NAN),
            present: ArrayD::from_elem(IxDyn(shape), false),
        }
    }

    /// Build from optional cells, `None` being absent.
    pub fn from_options(cells: ArrayD<Option<f64>>) -> Self {
        Self {
            values: cells.mapv(|c| c.unwrap_or(f64::NAN)),
            present: cells.mapv(|c| c.is_some()),
        }
    }

    /// Shape of the array.
    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.values.ndim()
    }

    /// Total number of cells, present or not.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the array has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw values; absent cells are `NaN`.
    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    /// Presence mask.
    pub fn present(&self) -> &ArrayD<bool> {
        &self.present
    }

    /// Value at `index`, or `None` if absent or out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        match self.present.get(index) {
            Some(true) => self.values.get(index).copied(),
            _ => None,
        }
    }

    /// Number of present cells.
    pub fn count(&self) -> usize {
        self.present.iter().filter(|&&p| p).count()
    }

    /// Number of present cells in each hyperplane along `axis`.
    ///
    /// Entry `i` counts the present cells whose index on `axis` is `i`.
    pub fn present_counts(&self, axis: usize) -> Vec<usize> {
        self.present
            .axis_iter(Axis(axis))
            .map(|plane| plane.iter().filter(|&&p| p).count())
            .collect()
    }

    /// Gather `indices` along `axis` into a new array.
    pub fn select(&self, axis: usize, indices: &[usize]) -> Self {
        Self {
            values: self.values.select(Axis(axis), indices),
            present: self.present.select(Axis(axis), indices),
        }
    }

    /// Keep only the hyperplanes along `axis` whose `keep` flag is set.
    pub fn compress(&self, axis: usize, keep: &[bool]) -> Self {
        let indices: Vec<usize> = keep
            .iter()
            .enumerate()
            .filter_map(|(i, &k)| k.then_some(i))
            .collect();
        self.select(axis, &indices)
    }

    /// Reorder axes so that output axis `i` is input axis `perm[i]`.
    pub fn permuted(&self, perm: &[usize]) -> Self {
        Self {
            values: self
                .values
                .view()
                .permuted_axes(IxDyn(perm))
                .as_standard_layout()
                .into_owned(),
            present: self
                .present
                .view()
                .permuted_axes(IxDyn(perm))
                .as_standard_layout()
                .into_owned(),
        }
    }

    /// Row-major reshape.
    pub fn reshaped(&self, shape: &[usize]) -> Result<Self> {
        let reshape_err = |e: ndarray::ShapeError| {
            StatsError::axis_consistency(format!(
                "cannot reshape {:?} into {:?}: {}",
                self.shape(),
                shape,
                e
            ))
        };
        let values = self
            .values
            .as_standard_layout()
            .into_owned()
            .into_shape_with_order(IxDyn(shape))
            .map_err(reshape_err)?;
        let present = self
            .present
            .as_standard_layout()
            .into_owned()
            .into_shape_with_order(IxDyn(shape))
            .map_err(reshape_err)?;
        Ok(Self { values, present })
    }

    /// Mean along `axis` ignoring absent cells, keeping the axis with length 1.
    ///
    /// A lane with no present cell yields an absent cell.
    pub fn mean_axis_keepdims(&self, axis: usize) -> Self {
        let cells = Zip::from(self.values.lanes(Axis(axis)))
            .and(self.present.lanes(Axis(axis)))
            .map_collect(|values, present| {
                let mut sum = 0.0;
                let mut count = 0usize;
                for (&v, &p) in values.iter().zip(present.iter()) {
                    if p {
                        sum += v;
                        count += 1;
                    }
                }
                (count > 0).then(|| sum / count as f64)
            });
        Self::from_options(cells.insert_axis(Axis(axis)))
    }

    /// Multiply every present cell by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            values: self.values.mapv(|v| v * factor),
            present: self.present.clone(),
        }
    }

    /// Elementwise `self / divisor`, where each axis of `divisor` either matches
    /// `self` or has length 1 and is broadcast.
    ///
    /// A result cell is present only if both operands are present and the
    /// divisor is non-zero.
    pub fn divide_broadcast(&self, divisor: &MaskedArray) -> Result<Self> {
        check_broadcastable(self.shape(), divisor.shape())?;
        let shape = self.values.raw_dim();
        let (dv, dp) = match (
            divisor.values.broadcast(shape.clone()),
            divisor.present.broadcast(shape),
        ) {
            (Some(dv), Some(dp)) => (dv, dp),
            _ => {
                return Err(StatsError::axis_consistency(format!(
                    "cannot broadcast {:?} to {:?}",
                    divisor.shape(),
                    self.shape()
                )))
            },
        };
        let cells = Zip::from(&self.values)
            .and(&self.present)
            .and(&dv)
            .and(&dp)
            .map_collect(|&v, &p, &d, &dpres| (p && dpres && d != 0.0).then(|| v / d));
        Ok(Self::from_options(cells))
    }

    /// Copy of the sub-array obtained by fixing the leading axes at `leading`.
    ///
    /// Panics if an index is out of bounds.
    pub fn fixed(&self, leading: &[usize]) -> Self {
        let mut values = self.values.view();
        let mut present = self.present.view();
        for &i in leading {
            values = values.index_axis_move(Axis(0), i);
            present = present.index_axis_move(Axis(0), i);
        }
        Self {
            values: values.to_owned(),
            present: present.to_owned(),
        }
    }

    /// Overwrite the sub-array at `leading` with `block`.
    pub fn assign_at(&mut self, leading: &[usize], block: &MaskedArray) -> Result<()> {
        let mut values = self.values.view_mut();
        let mut present = self.present.view_mut();
        for &i in leading {
            values = values.index_axis_move(Axis(0), i);
            present = present.index_axis_move(Axis(0), i);
        }
        if values.shape() != block.shape() {
            return Err(StatsError::axis_consistency(format!(
                "block of shape {:?} does not fit target {:?}",
                block.shape(),
                values.shape()
            )));
        }
        values.assign(&block.values);
        present.assign(&block.present);
        Ok(())
    }

    /// Gather the Cartesian product of per-axis index lists.
    ///
    /// Output cell `[i0, i1, ...]` is input cell
    /// `[index_lists[0][i0], index_lists[1][i1], ...]`.
    pub fn gather(&self, index_lists: &[Vec<usize>]) -> Self {
        let shape: Vec<usize> = index_lists.iter().map(Vec::len).collect();
        let cells = ArrayD::from_shape_fn(IxDyn(&shape), |ix| {
            let source: Vec<usize> = ix
                .slice()
                .iter()
                .zip(index_lists)
                .map(|(&i, list)| list[i])
                .collect();
            self.get(&source)
        });
        Self::from_options(cells)
    }
}

fn check_broadcastable(target: &[usize], source: &[usize]) -> Result<()> {
    let compatible = target.len() == source.len()
        && target
            .iter()
            .zip(source.iter())
            .all(|(&t, &s)| s == t || s == 1);
    if compatible {
        Ok(())
    } else {
        Err(StatsError::axis_consistency(format!(
            "divisor shape {:?} is not broadcastable to {:?}",
            source, target
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, ArrayD};

    fn grid() -> MaskedArray {
        // 2 x 3, one missing cell at (1, 1)
        let values: ArrayD<f64> = array![[1.0, 2.0, 3.0], [4.0, f64::NAN, 6.0]].into_dyn();
        MaskedArray::from_values(values)
    }

    #[test]
    fn counts_per_hyperplane() {
        let a = grid();
        assert_eq!(a.count(), 5);
        assert_eq!(a.present_counts(0), vec![3, 2]);
        assert_eq!(a.present_counts(1), vec![2, 1, 2]);
    }

    #[test]
    fn mean_ignores_absent_cells() {
        let m = grid().mean_axis_keepdims(0);
        assert_eq!(m.shape(), &[1, 3]);
        assert_eq!(m.get(&[0, 0]), Some(2.5));
        assert_eq!(m.get(&[0, 1]), Some(2.0));
        assert_eq!(m.get(&[0, 2]), Some(4.5));
    }

    #[test]
    fn mean_of_all_absent_lane_is_absent() {
        let values: ArrayD<f64> = array![[f64::NAN, 1.0], [f64::NAN, 3.0]].into_dyn();
        let m = MaskedArray::from_values(values).mean_axis_keepdims(0);
        assert_eq!(m.get(&[0, 0]), None);
        assert_eq!(m.get(&[0, 1]), Some(2.0));
    }

    #[test]
    fn divide_broadcasts_length_one_axes() {
        let divisor = MaskedArray::from_values(array![[2.0, 0.0, 3.0]].into_dyn());
        let q = grid().divide_broadcast(&divisor).unwrap();
        assert_eq!(q.get(&[0, 0]), Some(0.5));
        assert_eq!(q.get(&[0, 1]), None, "zero divisor masks the cell");
        assert_eq!(q.get(&[1, 2]), Some(2.0));
        assert_eq!(q.get(&[1, 1]), None);
    }

    #[test]
    fn divide_rejects_mismatched_shapes() {
        let divisor = MaskedArray::from_values(array![[2.0, 1.0]].into_dyn());
        assert!(matches!(
            grid().divide_broadcast(&divisor),
            Err(StatsError::AxisConsistency(_))
        ));
    }

    #[test]
    fn permute_and_reshape() {
        let t = grid().permuted(&[1, 0]);
        assert_eq!(t.shape(), &[3, 2]);
        assert_eq!(t.get(&[2, 1]), Some(6.0));
        let flat = t.reshaped(&[6]).unwrap();
        assert_eq!(flat.get(&[5]), Some(6.0));
        assert_eq!(flat.get(&[3]), None);
    }

    #[test]
    fn compress_drops_flagged_planes() {
        let c = grid().compress(1, &[true, false, true]);
        assert_eq!(c.shape(), &[2, 2]);
        assert_eq!(c.get(&[1, 1]), Some(6.0));
    }

    #[test]
    fn gather_takes_cartesian_product() {
        let g = grid().gather(&[vec![1, 0], vec![2, 1]]);
        assert_eq!(g.shape(), &[2, 2]);
        assert_eq!(g.get(&[0, 0]), Some(6.0));
        assert_eq!(g.get(&[0, 1]), None);
        assert_eq!(g.get(&[1, 0]), Some(3.0));
        assert_eq!(g.get(&[1, 1]), Some(2.0));
    }

    #[test]
    fn fixed_and_assign_round_trip() {
        let row = grid().fixed(&[1]);
        assert_eq!(row.shape(), &[3]);
        assert_eq!(row.get(&[2]), Some(6.0));

        let mut target = MaskedArray::masked(&[2, 3]);
        target.assign_at(&[0], &row).unwrap();
        assert_eq!(target.get(&[0, 0]), Some(4.0));
        assert_eq!(target.get(&[0, 1]), None);
        assert_eq!(target.get(&[1, 0]), None);
        assert!(target.assign_at(&[1], &grid()).is_err());
    }

    #[test]
    fn fill_value_is_absent() {
        let values: ArrayD<f64> = array![1.0, -9999.0, 2.0].into_dyn();
        let a = MaskedArray::from_values_with_fill(values, Some(-9999.0));
        assert_eq!(a.count(), 2);
        assert_eq!(a.get(&[1]), None);
    }
}
