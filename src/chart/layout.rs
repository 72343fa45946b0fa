//! Bar chart geometry.

use crate::pipeline::PlotResult;

/// Layout constants for the grouped bar chart.
#[derive(Debug, Clone)]
pub struct ChartLayoutConfig {
    /// Width of a bar group in x units (x positions are 1 apart).
    pub group_width: f64,
    /// Lower y limit as a fraction of the smallest value.
    pub y_lower_factor: f64,
    /// Upper y limit as a fraction of the largest value.
    pub y_upper_factor: f64,
    /// Width of the legend panel in characters.
    pub legend_width: u16,
}

impl Default for ChartLayoutConfig {
    fn default() -> Self {
        Self {
            group_width: 0.75,
            y_lower_factor: 0.95,
            y_upper_factor: 1.05,
            legend_width: 28,
        }
    }
}

/// Where every bar goes.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    /// Width of a single bar.
    pub bar_width: f64,
    /// X coordinate of each group's center, one per x label.
    pub group_centers: Vec<f64>,
    /// `locations[bar][x]` is the center of bar `bar` in group `x`.
    pub locations: Vec<Vec<f64>>,
    /// Horizontal bounds with half a slot of margin on both sides.
    pub x_bounds: [f64; 2],
    /// Vertical bounds, `None` if nothing is present.
    pub y_bounds: Option<[f64; 2]>,
}

impl BarLayout {
    /// Compute the layout of `plot`.
    pub fn compute(plot: &PlotResult, config: &ChartLayoutConfig) -> Self {
        let bars = plot.num_bars();
        let groups = plot.num_groups();
        let bar_width = config.group_width / bars.max(1) as f64;

        let group_centers: Vec<f64> = (0..groups).map(|x| x as f64).collect();
        let locations = (0..bars)
            .map(|bar| {
                let offset = (bar as f64 - (bars as f64 - 1.0) / 2.0) * bar_width;
                group_centers.iter().map(|c| c + offset).collect()
            })
            .collect();

        Self {
            bar_width,
            group_centers,
            locations,
            x_bounds: [-0.5, groups as f64 - 0.5],
            y_bounds: y_bounds(plot, config),
        }
    }

    /// Center of bar `bar` in group `x`.
    pub fn location(&self, bar: usize, x: usize) -> Option<f64> {
        self.locations.get(bar)?.get(x).copied()
    }
}

fn y_bounds(plot: &PlotResult, config: &ChartLayoutConfig) -> Option<[f64; 2]> {
    let (min, max) = plot
        .values
        .values()
        .iter()
        .zip(plot.values.present().iter())
        .filter_map(|(&v, &p)| p.then_some(v))
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    // Scale towards zero below and away from zero above, whatever the sign.
    let lower = if min >= 0.0 {
        config.y_lower_factor * min
    } else {
        (2.0 - config.y_lower_factor) * min
    };
    let upper = if max >= 0.0 {
        config.y_upper_factor * max
    } else {
        (2.0 - config.y_upper_factor) * max
    };

    if upper > lower {
        Some([lower, upper])
    } else {
        Some([lower - 1.0, upper + 1.0])
    }
}

/// X tick labels padded with blanks so that ratatui's evenly spaced labels
/// land on the group centers when the bounds are `[-0.5, n - 0.5]`.
pub fn tick_slots(labels: &[String]) -> Vec<String> {
    let mut slots = Vec::with_capacity(2 * labels.len() + 1);
    slots.push(String::new());
    for label in labels {
        slots.push(label.clone());
        slots.push(String::new());
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AxisKind, MaskedArray};
    use ndarray::array;

    fn plot(values: MaskedArray) -> PlotResult {
        let bars = values.shape()[0];
        let groups = values.shape()[1];
        PlotResult {
            stdevs: values.clone(),
            values,
            bar_labels: (bars > 1).then(|| (0..bars).map(|b| format!("bar{}", b)).collect()),
            x_labels: (0..groups).map(|x| format!("x{}", x)).collect(),
            x_axis: AxisKind::Clim,
            y_unit: "days per week".to_string(),
            title: "values".to_string(),
        }
    }

    #[test]
    fn bars_are_centered_on_groups() {
        let p = plot(MaskedArray::from_values(
            array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]].into_dyn(),
        ));
        let layout = BarLayout::compute(&p, &ChartLayoutConfig::default());
        assert_eq!(layout.bar_width, 0.25);
        assert_eq!(layout.group_centers, vec![0.0, 1.0]);
        assert_eq!(layout.location(0, 0), Some(-0.25));
        assert_eq!(layout.location(1, 1), Some(1.0));
        assert_eq!(layout.location(2, 1), Some(1.25));
        assert_eq!(layout.location(3, 0), None);
        assert_eq!(layout.x_bounds, [-0.5, 1.5]);
    }

    #[test]
    fn single_bar_sits_on_center() {
        let p = plot(MaskedArray::from_values(array![[2.0, 4.0]].into_dyn()));
        let layout = BarLayout::compute(&p, &ChartLayoutConfig::default());
        assert_eq!(layout.bar_width, 0.75);
        assert_eq!(layout.locations, vec![vec![0.0, 1.0]]);
    }

    #[test]
    fn y_limits_pad_min_and_max() {
        let p = plot(MaskedArray::from_values(
            array![[2.0, f64::NAN], [10.0, 4.0]].into_dyn(),
        ));
        let [lo, hi] = BarLayout::compute(&p, &ChartLayoutConfig::default())
            .y_bounds
            .unwrap();
        assert!((lo - 1.9).abs() < 1e-12);
        assert!((hi - 10.5).abs() < 1e-12);
    }

    #[test]
    fn y_limits_of_flat_data_are_widened() {
        let p = plot(MaskedArray::from_values(array![[0.0, 0.0]].into_dyn()));
        let bounds = BarLayout::compute(&p, &ChartLayoutConfig::default()).y_bounds;
        assert_eq!(bounds, Some([-1.0, 1.0]));
    }

    #[test]
    fn tick_slots_interleave_blanks() {
        let slots = tick_slots(&["DJF".to_string(), "JJA".to_string()]);
        assert_eq!(slots, ["", "DJF", "", "JJA", ""]);
    }
}
