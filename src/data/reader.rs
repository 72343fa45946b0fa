//! NetCDF reader for collected-stats files.

use super::{band_label, Axis, AxisCatalog, MaskedArray, StatLayers, StatsDataset};
use crate::error::{Result, StatsError};
use ndarray::{ArrayD, IxDyn};
use std::path::Path;

/// Bands used when a file carries no spatial bounds.
const GLOBAL_LAT: (f64, f64) = (-90.0, 90.0);
const GLOBAL_LON: (f64, f64) = (-180.0, 180.0);

/// NetCDF data reader.
#[derive(Debug)]
pub struct DataReader;

impl DataReader {
    /// Read a collected-stats NetCDF file.
    pub fn read_file(path: &Path) -> Result<StatsDataset> {
        let file = netcdf::open(path).map_err(|e| StatsError::NetCDF(e.to_string()))?;

        let latitudes = match file.variable("lat_bounds") {
            Some(var) => Self::read_bands(&var, true)?,
            None => vec![band_label(GLOBAL_LAT, true)],
        };
        let longitudes = match file.variable("lon_bounds") {
            Some(var) => Self::read_bands(&var, false)?,
            None => vec![band_label(GLOBAL_LON, false)],
        };

        let catalog = AxisCatalog {
            models: Axis::new(Self::read_names(&file, "model_names")?),
            scenarios: Axis::new(Self::read_names(&file, "scenario_names")?),
            year_ranges: Axis::new(Self::read_names(&file, "year_ranges")?),
            seasons: Axis::new(Self::read_names(&file, "season_names")?),
            months: Axis::new(Self::read_names(&file, "month_names")?),
            latitudes: Axis::new(latitudes),
            longitudes: Axis::new(longitudes),
        };

        let units = file
            .variable("seasonal_clim")
            .and_then(|v| v.attribute("units"))
            .and_then(|a| match a.value() {
                Ok(netcdf::AttributeValue::Str(s)) => Some(s),
                _ => None,
            })
            .unwrap_or_default();

        let seasonal = StatLayers::new(
            Self::read_stat(&file, "seasonal_clim")?,
            Self::read_stat(&file, "seasonal_clim_stdev")?,
        )?;
        let monthly = StatLayers::new(
            Self::read_stat(&file, "monthly_clim")?,
            Self::read_stat(&file, "monthly_clim_stdev")?,
        )?;

        tracing::info!(
            "Read {}: {} models, {} scenarios, {} year ranges",
            path.display(),
            catalog.models.len(),
            catalog.scenarios.len(),
            catalog.year_ranges.len()
        );

        StatsDataset::new(catalog, units, seasonal, monthly)
    }

    fn read_names(file: &netcdf::File, name: &str) -> Result<Vec<String>> {
        let var = file
            .variable(name)
            .ok_or_else(|| StatsError::missing_variable(name))?;
        let len = var.dimensions().first().map(|d| d.len()).unwrap_or(0);
        (0..len)
            .map(|i| {
                var.get_string([i])
                    .map(|s| s.trim().to_string())
                    .map_err(|e| StatsError::NetCDF(format!("Failed to read {}[{}]: {}", name, i, e)))
            })
            .collect()
    }

    fn read_bands(var: &netcdf::Variable<'_>, latitude: bool) -> Result<Vec<String>> {
        let bounds: Vec<f64> = var
            .get_values(..)
            .map_err(|e| StatsError::NetCDF(format!("Failed to read {}: {}", var.name(), e)))?;
        if bounds.len() % 2 != 0 {
            return Err(StatsError::NetCDF(format!(
                "{} must hold (lower, upper) pairs",
                var.name()
            )));
        }
        Ok(bounds
            .chunks_exact(2)
            .map(|pair| band_label((pair[0], pair[1]), latitude))
            .collect())
    }

    fn read_stat(file: &netcdf::File, name: &str) -> Result<MaskedArray> {
        let var = file
            .variable(name)
            .ok_or_else(|| StatsError::missing_variable(name))?;

        let mut shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        let fill = var
            .attribute("_FillValue")
            .and_then(|a| match a.value() {
                Ok(netcdf::AttributeValue::Double(v)) => Some(v),
                Ok(netcdf::AttributeValue::Float(v)) => Some(v as f64),
                _ => None,
            });

        let values: Vec<f64> = var
            .get_values(..)
            .map_err(|e| StatsError::NetCDF(format!("Failed to read {}: {}", name, e)))?;

        // Files without spatial bands are 4-D; give them singleton lat/lon axes.
        if shape.len() == 4 {
            shape.extend([1, 1]);
        }

        let data = ArrayD::from_shape_vec(IxDyn(&shape), values)
            .map_err(|e| StatsError::NetCDF(format!("Invalid shape/data size: {}", e)))?;
        Ok(MaskedArray::from_values_with_fill(data, fill))
    }
}
