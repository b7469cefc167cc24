use thiserror::Error;

use crate::bundle::BundleError;
use crate::locale::ConfigurationError;
use crate::script::WriteError;

/// Defines errors that may occur while exporting the scripts
#[derive(Error, Debug)]
pub enum ExportError {
    /// The locale list is missing or empty
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The bundle of a locale could not be loaded
    #[error(transparent)]
    Bundle(#[from] BundleError),
    /// The script of a locale could not be written
    #[error(transparent)]
    Write(#[from] WriteError),
}

impl ExportError {
    /// Whether the bundle simply does not exist, as opposed to being unreadable.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Bundle(BundleError::NotFound { .. }))
    }
}
