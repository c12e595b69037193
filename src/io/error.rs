//! Error types and path context for neighbor measurement operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all measurement and I/O operations
#[derive(Debug)]
pub enum NeighborError {
    /// Mask is not two-dimensional after dropping singleton axes
    InvalidMaskShape {
        /// Shape of the rejected array
        shape: Vec<usize>,
    },

    /// Neither or an unusable combination of `dmax` / `kmax` was supplied
    InvalidParameterCombination {
        /// Neighborhood strategy that rejected the parameters
        neighborhood: &'static str,
        /// Explanation of what combination is required
        reason: String,
    },

    /// Distance metric not supported by the requested strategy
    UnsupportedMetric {
        /// Neighborhood strategy that rejected the metric
        neighborhood: &'static str,
        /// Canonical name of the rejected metric
        metric: String,
    },

    /// A parameter the strategy cannot run without was omitted
    MissingRequiredParameter {
        /// Neighborhood strategy that requires the parameter
        neighborhood: &'static str,
        /// Name of the missing parameter
        parameter: &'static str,
    },

    /// A parameter was supplied that the strategy has no meaning for
    UnsupportedParameterCombination {
        /// Neighborhood strategy that rejected the parameter
        neighborhood: &'static str,
        /// Name of the unsupported parameter
        parameter: &'static str,
    },

    /// Parameter value failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to decode a mask through the image codecs
    MaskLoad {
        /// Path to the mask file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to decode a TIFF mask
    TiffDecode {
        /// Path to the mask file
        path: PathBuf,
        /// Underlying TIFF decoding error
        source: tiff::TiffError,
    },

    /// Mask pixels are not single-sample unsigned integers
    UnsupportedMaskFormat {
        /// Path to the mask file
        path: PathBuf,
        /// Description of the offending pixel format
        reason: String,
    },

    /// Failed to write a neighbor table
    TableExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying CSV error
        source: csv::Error,
    },

    /// Failed to read a neighbor or attribute table
    TableImport {
        /// Path of the table being read
        path: PathBuf,
        /// Underlying CSV error
        source: csv::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for NeighborError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMaskShape { shape } => {
                write!(f, "Mask must be two-dimensional, got shape {shape:?}")
            }
            Self::InvalidParameterCombination {
                neighborhood,
                reason,
            } => {
                write!(
                    f,
                    "Invalid parameter combination for {neighborhood} neighborhood: {reason}"
                )
            }
            Self::UnsupportedMetric {
                neighborhood,
                metric,
            } => {
                write!(
                    f,
                    "Metric '{metric}' is not supported by the {neighborhood} neighborhood"
                )
            }
            Self::MissingRequiredParameter {
                neighborhood,
                parameter,
            } => {
                write!(
                    f,
                    "The {neighborhood} neighborhood requires parameter '{parameter}'"
                )
            }
            Self::UnsupportedParameterCombination {
                neighborhood,
                parameter,
            } => {
                write!(
                    f,
                    "The {neighborhood} neighborhood does not accept parameter '{parameter}'"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MaskLoad { path, source } => {
                write!(f, "Failed to load mask '{}': {source}", path.display())
            }
            Self::TiffDecode { path, source } => {
                write!(
                    f,
                    "Failed to decode TIFF mask '{}': {source}",
                    path.display()
                )
            }
            Self::UnsupportedMaskFormat { path, reason } => {
                write!(
                    f,
                    "Unsupported mask format in '{}': {reason}",
                    path.display()
                )
            }
            Self::TableExport { path, source } => {
                write!(
                    f,
                    "Failed to export table to '{}': {source}",
                    path.display()
                )
            }
            Self::TableImport { path, source } => {
                write!(f, "Failed to read table '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for NeighborError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MaskLoad { source, .. } => Some(source),
            Self::TiffDecode { source, .. } => Some(source),
            Self::TableExport { source, .. } | Self::TableImport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for measurement results
pub type Result<T> = std::result::Result<T, NeighborError>;

const UNKNOWN_PATH: &str = "<unknown>";

/// Attaches the file being processed to errors raised without one
pub trait WithPath<T> {
    /// Replace a placeholder path in the error with `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<NeighborError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors created through `From` carry the placeholder
            match &mut error {
                NeighborError::MaskLoad { path: p, .. }
                | NeighborError::TiffDecode { path: p, .. }
                | NeighborError::UnsupportedMaskFormat { path: p, .. }
                | NeighborError::TableExport { path: p, .. }
                | NeighborError::TableImport { path: p, .. }
                | NeighborError::FileSystem { path: p, .. }
                    if p.as_os_str() == UNKNOWN_PATH =>
                {
                    *p = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for NeighborError {
    fn from(err: image::ImageError) -> Self {
        Self::MaskLoad {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<tiff::TiffError> for NeighborError {
    fn from(err: tiff::TiffError) -> Self {
        Self::TiffDecode {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for NeighborError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> NeighborError {
    NeighborError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an error for an unusable target path
pub fn io_error(path: &Path, msg: &str) -> NeighborError {
    NeighborError::FileSystem {
        path: path.to_path_buf(),
        operation: "resolve target",
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, msg.to_string()),
    }
}
