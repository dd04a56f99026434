//! Color manager error types.

use thiserror::Error;
use vcms_icc::IccError;
use vcms_lut::LutError;

/// Result type for color manager operations.
pub type CmsResult<T> = Result<T, CmsError>;

/// Errors that can occur while producing a video LUT.
#[derive(Debug, Error)]
pub enum CmsError {
    /// LUT file or grid error.
    #[error(transparent)]
    Lut(#[from] LutError),

    /// Profile, tone curve or transform error.
    #[error(transparent)]
    Icc(#[from] IccError),

    /// Settings out of range or incomplete.
    #[error("invalid settings: {0}")]
    Settings(String),

    /// Settings file could not be parsed.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad failure category, for callers that only need to know what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// File could not be opened or read.
    Io,
    /// LUT file structure is invalid.
    Format,
    /// LUT file or grid has the wrong length.
    Size,
    /// Display or source profile could not be created, loaded or linked.
    Profile,
    /// The linked transform failed on the sample batch.
    Transform,
    /// Settings are invalid.
    Settings,
}

impl CmsError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CmsError::Lut(LutError::Io(_)) => ErrorKind::Io,
            CmsError::Lut(LutError::Format(_)) => ErrorKind::Format,
            CmsError::Lut(LutError::Size { .. }) => ErrorKind::Size,
            CmsError::Icc(IccError::ApplyFailed(_)) => ErrorKind::Transform,
            CmsError::Icc(_) => ErrorKind::Profile,
            CmsError::Settings(_) | CmsError::Yaml(_) => ErrorKind::Settings,
            CmsError::Io(_) => ErrorKind::Io,
        }
    }
}
