//! Small hand-built datasets for pipeline tests.

use crate::data::{Axis, AxisCatalog, ClimKind, MaskedArray, StatLayers, StatsDataset};
use ndarray::{ArrayD, Dimension, IxDyn};

/// Two models, historical + rcp85, two year ranges, two seasons/months,
/// two latitude bands and one longitude band.
pub(crate) fn toy_catalog() -> AxisCatalog {
    AxisCatalog {
        models: Axis::new(["A", "B"]),
        scenarios: Axis::new(["historical", "rcp85"]),
        year_ranges: Axis::new(["1976-2005", "2071-2100"]),
        seasons: Axis::new(["DJF", "JJA"]),
        months: Axis::new(["Jan", "Jul"]),
        latitudes: Axis::new(["10N-20N", "20N-40N"]),
        longitudes: Axis::new(["0E-10E"]),
    }
}

/// Dataset over [`toy_catalog`] whose cell `[m, s, y, c, lat, lon]` is
/// `value(&[m, s, y, c, lat, lon])`; stdevs are a tenth of the values.
pub(crate) fn toy_dataset(value: impl Fn(&[usize]) -> Option<f64>) -> StatsDataset {
    let catalog = toy_catalog();
    let layers = |clim: ClimKind| {
        let cells = ArrayD::from_shape_fn(IxDyn(&catalog.shape(clim)), |ix| value(ix.slice()));
        let values = MaskedArray::from_options(cells.clone());
        let stdevs = MaskedArray::from_options(cells.mapv(|c| c.map(|v| v / 10.0)));
        StatLayers::new(values, stdevs).expect("layers share a shape")
    };
    let seasonal = layers(ClimKind::Seasons);
    let monthly = layers(ClimKind::Months);
    StatsDataset::new(catalog, "days", seasonal, monthly).expect("toy dataset is consistent")
}

/// Historical runs cover the first year range, rcp85 the second, and model A
/// has no rcp85 run. Values encode their indices: `m*1000 + s*100 + y*10 + c + lat/10`.
pub(crate) fn missing_rcp85_for_a(ix: &[usize]) -> Option<f64> {
    let (m, s, y, c, lat) = (ix[0], ix[1], ix[2], ix[3], ix[4]);
    let has_run = (s == 0 && y == 0) || (s == 1 && y == 1 && m == 1);
    has_run.then(|| (m * 1000 + s * 100 + y * 10 + c) as f64 + lat as f64 / 10.0)
}
