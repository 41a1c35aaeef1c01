//! Error types for export operations

use crate::assets::AssetError;
use crate::backend::BackendError;
use thiserror::Error;

/// Errors that can occur while exporting or previewing a document.
///
/// These never cross the public driver surface as panics or thrown values;
/// the driver folds them into an [`crate::ExportOutcome`].
#[derive(Debug, Error)]
pub enum ExportError {
    /// The rendering backend failed its one-time initialization; fatal for
    /// this process lifetime
    #[error("rendering backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend failed while materializing a document
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A brand asset could not be resolved
    #[error(transparent)]
    Asset(#[from] AssetError),
}
