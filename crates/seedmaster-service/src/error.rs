//! Errors that can originate at the adapter layer itself, as opposed to
//! inside `seedmaster-core`.

use thiserror::Error;

use seedmaster_core::SeedMasterError;

/// Union of core seed-master errors and the adapter's own I/O failures
/// (currently only possible while writing the end-of-job summary).
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error(transparent)]
    Core(#[from] SeedMasterError),

    #[error("failed to write end-of-job summary: {0}")]
    Io(#[from] std::io::Error),
}
