//! Legend entries, x labels and the chart title.

use super::reorder::Reordered;
use super::spatial::is_mean_label;
use super::YAxisMode;
use crate::error::{Result, StatsError};

/// Text that goes around the plotted numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// One label per bar group, or `None` when a legend would be pointless.
    pub bar_labels: Option<Vec<String>>,
    /// One label per x position.
    pub x_labels: Vec<String>,
    /// Multi-line chart title.
    pub title: String,
}

/// Build labels for a compacted chart.
///
/// Bar axes left with a single name go into the title (unless the name is a
/// synthetic mean label, which the tails already describe). The rest are
/// joined with spaces, in bar-axis order, to label each row.
pub fn build(reordered: &Reordered, tails: &[String], y_axis: YAxisMode) -> Result<Labels> {
    let mut title_elements = Vec::new();
    let mut varying = Vec::new();

    for (dim, names) in reordered.bar_names.iter().enumerate() {
        match names.as_slice() {
            [] => {
                return Err(StatsError::axis_consistency(format!(
                    "no {} left to label",
                    reordered.bar_axes[dim]
                )))
            },
            [only] => {
                if !is_mean_label(only) {
                    title_elements.push(only.clone());
                }
            },
            _ => varying.push(dim),
        }
    }
    if reordered.x_labels.is_empty() {
        return Err(StatsError::axis_consistency(format!(
            "no {} left to label",
            reordered.x_axis
        )));
    }

    let bar_labels = if reordered.num_rows() < 2 {
        None
    } else {
        Some(
            reordered
                .rows
                .iter()
                .map(|row| {
                    varying
                        .iter()
                        .map(|&dim| reordered.bar_names[dim][row[dim]].as_str())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect(),
        )
    };

    Ok(Labels {
        bar_labels,
        x_labels: reordered.x_labels.clone(),
        title: title(y_axis, &title_elements, tails),
    })
}

/// `"{mode} for {elements}"`, one element and then one tail per line.
pub fn title(y_axis: YAxisMode, elements: &[String], tails: &[String]) -> String {
    let mut title = y_axis.label().to_string();
    if !elements.is_empty() {
        title.push_str(" for ");
        title.push_str(&elements.join("\n"));
    }
    for tail in tails {
        title.push('\n');
        title.push_str(tail);
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AxisKind, MaskedArray};
    use ndarray::ArrayD;
    use ndarray::IxDyn;

    fn reordered(bar_names: Vec<Vec<&str>>, rows: Vec<Vec<usize>>) -> Reordered {
        let values = MaskedArray::from_values(ArrayD::from_elem(IxDyn(&[rows.len(), 2]), 1.0));
        Reordered {
            stdevs: values.clone(),
            values,
            bar_axes: vec![AxisKind::Model, AxisKind::Scenario, AxisKind::Latitude],
            bar_names: bar_names
                .into_iter()
                .map(|names| names.into_iter().map(String::from).collect())
                .collect(),
            rows,
            x_axis: AxisKind::YearRange,
            x_labels: vec!["2041-2070".into(), "2071-2100".into()],
        }
    }

    #[test]
    fn single_name_axes_move_to_title() {
        let r = reordered(
            vec![vec!["A", "B"], vec!["rcp85"], vec!["latmean"]],
            vec![vec![0, 0, 0], vec![1, 0, 0]],
        );
        let tails = vec!["latmean(10N-20N,20N-40N)".to_string()];
        let labels = build(&r, &tails, YAxisMode::Values).unwrap();
        assert_eq!(labels.bar_labels, Some(vec!["A".to_string(), "B".to_string()]));
        assert_eq!(labels.title, "values for rcp85\nlatmean(10N-20N,20N-40N)");
        assert_eq!(labels.x_labels, ["2041-2070", "2071-2100"]);
    }

    #[test]
    fn bar_labels_join_varying_axes_in_order() {
        let r = reordered(
            vec![vec!["A", "B"], vec!["rcp45", "rcp85"], vec!["20N-40N"]],
            vec![vec![0, 0, 0], vec![0, 1, 0], vec![1, 1, 0]],
        );
        let labels = build(&r, &[], YAxisMode::Ratio).unwrap();
        assert_eq!(
            labels.bar_labels.unwrap(),
            ["A rcp45", "A rcp85", "B rcp85"]
        );
        assert_eq!(labels.title, "ratio to historical for 20N-40N");
    }

    #[test]
    fn single_bar_has_no_legend() {
        let r = reordered(vec![vec!["A"], vec!["rcp85"], vec!["20N-40N"]], vec![vec![0, 0, 0]]);
        let labels = build(&r, &[], YAxisMode::Values).unwrap();
        assert_eq!(labels.bar_labels, None);
        assert_eq!(labels.title, "values for A\nrcp85\n20N-40N");
    }

    #[test]
    fn empty_axis_is_an_internal_error() {
        let r = reordered(vec![vec![], vec!["rcp85"], vec!["x"]], vec![]);
        assert!(matches!(
            build(&r, &[], YAxisMode::Values),
            Err(StatsError::AxisConsistency(_))
        ));
    }

    #[test]
    fn title_without_elements() {
        assert_eq!(title(YAxisMode::Values, &[], &[]), "values");
        assert_eq!(
            title(YAxisMode::Values, &[], &["modelmean(A,B)".to_string()]),
            "values\nmodelmean(A,B)"
        );
    }
}
