//! Error types for Climstats.
//!
//! This module provides a unified error handling approach using `thiserror`.

use thiserror::Error;

/// Result type alias for Climstats operations.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors that can occur in Climstats.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The selection is malformed (mixed seasons and months, unknown names, ...).
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// The selection contains no present data.
    #[error("Empty selection: {0}")]
    EmptySelection(String),

    /// Ratio mode was requested but there is no historical data to divide by.
    #[error("No historical baseline: {0}")]
    BaselineMismatch(String),

    /// Array shape and axis names disagree. This is a defect, not a user error.
    #[error("Axis consistency violated: {0}")]
    AxisConsistency(String),

    /// A required variable is missing from the input file.
    #[error("Missing variable: {name}")]
    MissingVariable {
        /// Variable name.
        name: String,
    },

    /// Failed to read NetCDF file.
    #[error("NetCDF error: {0}")]
    NetCDF(String),

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StatsError {
    /// Create an InvalidSelection error.
    pub fn invalid_selection(msg: impl Into<String>) -> Self {
        Self::InvalidSelection(msg.into())
    }

    /// Create an EmptySelection error.
    pub fn empty_selection(msg: impl Into<String>) -> Self {
        Self::EmptySelection(msg.into())
    }

    /// Create a BaselineMismatch error.
    pub fn baseline_mismatch(msg: impl Into<String>) -> Self {
        Self::BaselineMismatch(msg.into())
    }

    /// Create an AxisConsistency error and log it, since it signals a defect.
    pub fn axis_consistency(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::error!("Axis consistency violated: {}", msg);
        Self::AxisConsistency(msg)
    }

    /// Create a MissingVariable error.
    pub fn missing_variable(name: impl Into<String>) -> Self {
        Self::MissingVariable { name: name.into() }
    }

    /// Whether the error comes from user input and should be shown as a message
    /// while keeping the previous chart.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InvalidSelection(_) | Self::EmptySelection(_) | Self::BaselineMismatch(_)
        )
    }
}

#[cfg(feature = "netcdf")]
impl From<netcdf::Error> for StatsError {
    fn from(err: netcdf::Error) -> Self {
        Self::NetCDF(err.to_string())
    }
}
