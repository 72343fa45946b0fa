//! Averaging over latitude, longitude or models.

use super::GatheredSlice;
use crate::data::AxisKind;
use crate::error::Result;

/// Label of the latitude axis after averaging.
pub const LAT_MEAN: &str = "latmean";
/// Label of the longitude axis after averaging.
pub const LON_MEAN: &str = "lonmean";
/// Label of the model axis after averaging.
pub const MODEL_MEAN: &str = "modelmean";

/// Which spatial axes are averaged away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SpatialMean {
    /// Keep every band.
    #[default]
    None,
    /// Average over latitude bands.
    #[value(name = "lat")]
    Latitude,
    /// Average over longitude bands.
    #[value(name = "lon")]
    Longitude,
    /// Average over both.
    #[value(name = "latlon")]
    Both,
}

impl SpatialMean {
    /// Get the next mode in cycle.
    pub fn next(self) -> Self {
        match self {
            SpatialMean::None => SpatialMean::Latitude,
            SpatialMean::Latitude => SpatialMean::Longitude,
            SpatialMean::Longitude => SpatialMean::Both,
            SpatialMean::Both => SpatialMean::None,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            SpatialMean::None => "none",
            SpatialMean::Latitude => "latitude",
            SpatialMean::Longitude => "longitude",
            SpatialMean::Both => "lat/lon",
        }
    }

    fn axes(self) -> &'static [(AxisKind, &'static str)] {
        match self {
            SpatialMean::None => &[],
            SpatialMean::Latitude => &[(AxisKind::Latitude, LAT_MEAN)],
            SpatialMean::Longitude => &[(AxisKind::Longitude, LON_MEAN)],
            SpatialMean::Both => &[(AxisKind::Latitude, LAT_MEAN), (AxisKind::Longitude, LON_MEAN)],
        }
    }
}

/// Whether `name` is one of the synthetic mean labels.
pub fn is_mean_label(name: &str) -> bool {
    matches!(name, LAT_MEAN | LON_MEAN | MODEL_MEAN)
}

/// Average `slice` along `axis`, keeping it with length 1 named `label`.
///
/// Returns the reduced slice and a title tail such as
/// `latmean(20N-40N,40N-60N)` naming the averaged categories.
pub fn mean_over(slice: &GatheredSlice, axis: AxisKind, label: &str) -> Result<(GatheredSlice, String)> {
    let dim = slice.position(axis)?;
    let tail = format!("{}({})", label, slice.names[dim].join(","));

    let layers = slice.layers.map(|a| a.mean_axis_keepdims(dim));
    let mut names = slice.names.clone();
    names[dim] = vec![label.to_string()];

    let reduced = GatheredSlice::new(layers, slice.axes.clone(), names)?;
    Ok((reduced, tail))
}

/// Apply a spatial mean mode, returning the reduced slice and its title tails.
pub fn reduce(slice: &GatheredSlice, mode: SpatialMean) -> Result<(GatheredSlice, Vec<String>)> {
    let mut current = slice.clone();
    let mut tails = Vec::new();
    for &(axis, label) in mode.axes() {
        let (reduced, tail) = mean_over(&current, axis, label)?;
        current = reduced;
        tails.push(tail);
    }
    Ok((current, tails))
}

/// Average over every gathered model.
pub fn reduce_models(slice: &GatheredSlice) -> Result<(GatheredSlice, String)> {
    mean_over(slice, AxisKind::Model, MODEL_MEAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MaskedArray, StatLayers};
    use ndarray::array;

    fn lat_slice() -> GatheredSlice {
        // model x lat: A has both bands, B misses the second one
        let values = MaskedArray::from_values(array![[1.0, 3.0], [5.0, f64::NAN]].into_dyn());
        let stdevs = values.scaled(0.1);
        GatheredSlice::new(
            StatLayers::new(values, stdevs).unwrap(),
            vec![AxisKind::Model, AxisKind::Latitude],
            vec![
                vec!["A".into(), "B".into()],
                vec!["10N-20N".into(), "20N-40N".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn latitude_mean_collapses_axis_and_names_bands() {
        let (reduced, tails) = reduce(&lat_slice(), SpatialMean::Latitude).unwrap();
        assert_eq!(tails, vec!["latmean(10N-20N,20N-40N)"]);
        assert_eq!(reduced.names[1], vec![LAT_MEAN]);
        assert_eq!(reduced.layers.shape(), &[2, 1]);
        assert_eq!(reduced.layers.values.get(&[0, 0]), Some(2.0));
        assert_eq!(reduced.layers.values.get(&[1, 0]), Some(5.0));
        reduced.check().unwrap();
    }

    #[test]
    fn none_is_identity() {
        let slice = lat_slice();
        let (reduced, tails) = reduce(&slice, SpatialMean::None).unwrap();
        assert!(tails.is_empty());
        assert_eq!(reduced, slice);
    }

    #[test]
    fn model_mean() {
        let (reduced, tail) = reduce_models(&lat_slice()).unwrap();
        assert_eq!(tail, "modelmean(A,B)");
        assert_eq!(reduced.layers.values.get(&[0, 0]), Some(3.0));
        assert_eq!(reduced.layers.values.get(&[0, 1]), Some(3.0));
    }

    #[test]
    fn missing_axis_is_reported() {
        assert!(reduce(&lat_slice(), SpatialMean::Longitude).is_err());
    }

    #[test]
    fn mean_labels() {
        assert!(is_mean_label("latmean"));
        assert!(is_mean_label("modelmean"));
        assert!(!is_mean_label("DJF"));
    }
}
