//! Deterministic synthetic dataset for `--demo` and tests.

use super::{band_label, Axis, AxisCatalog, ClimKind, MaskedArray, StatLayers, StatsDataset};
use crate::error::Result;
use ndarray::{ArrayD, IxDyn};

const MODELS: [&str; 3] = ["CCSM4", "GFDL-CM3", "MIROC5"];
const SCENARIOS: [&str; 3] = ["historical", "rcp45", "rcp85"];
const YEAR_RANGES: [&str; 3] = ["1976-2005", "2041-2070", "2071-2100"];
const SEASONS: [&str; 4] = ["DJF", "MAM", "JJA", "SON"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const LAT_BOUNDS: [(f64, f64); 4] = [(-20.0, 0.0), (0.0, 20.0), (20.0, 40.0), (40.0, 60.0)];
const LON_BOUNDS: [(f64, f64); 2] = [(-130.0, -100.0), (-100.0, -70.0)];

/// Build the demo dataset.
///
/// Historical runs exist only for the first year range and future scenarios
/// only for the later ones. MIROC5 has no rcp45 run at all.
pub fn demo_dataset() -> Result<StatsDataset> {
    let catalog = AxisCatalog {
        models: Axis::new(MODELS),
        scenarios: Axis::new(SCENARIOS),
        year_ranges: Axis::new(YEAR_RANGES),
        seasons: Axis::new(SEASONS),
        months: Axis::new(MONTHS),
        latitudes: Axis::new(LAT_BOUNDS.iter().map(|&b| band_label(b, true))),
        longitudes: Axis::new(LON_BOUNDS.iter().map(|&b| band_label(b, false))),
    };

    let seasonal = layers(&catalog, ClimKind::Seasons)?;
    let monthly = layers(&catalog, ClimKind::Months)?;
    StatsDataset::new(catalog, "days", seasonal, monthly)
}

fn layers(catalog: &AxisCatalog, clim: ClimKind) -> Result<StatLayers> {
    let shape = catalog.shape(clim);
    let periods = shape[3] as f64;
    let values = ArrayD::from_shape_fn(IxDyn(&shape), |ix| {
        let (m, s, y, c, la, lo) = (ix[0], ix[1], ix[2], ix[3], ix[4], ix[5]);
        if !has_run(m, s, y) {
            return f64::NAN;
        }
        let cycle = 1.0 + 0.4 * (2.0 * std::f64::consts::PI * c as f64 / periods).cos();
        let base = (2.0 + 0.5 * m as f64 + 0.3 * la as f64 + 0.2 * lo as f64) * cycle;
        let warming = match s {
            0 => 1.0,
            1 => 1.05 + 0.05 * y as f64,
            _ => 1.1 + 0.1 * y as f64,
        };
        base * warming
    });
    let stdevs = values.mapv(|v| 0.1 * v);
    StatLayers::new(
        MaskedArray::from_values(values),
        MaskedArray::from_values(stdevs),
    )
}

fn has_run(model: usize, scenario: usize, year_range: usize) -> bool {
    let historical = scenario == 0;
    let missing_rcp45 = model == 2 && scenario == 1;
    historical == (year_range == 0) && !missing_rcp45
}
