//! One-time backend initialization state
//!
//! The rendering backend's asset table is loaded once per process. The first
//! export or preview call performs the attempt; every later call observes the
//! cached outcome, success or permanent failure, without re-attempting.
//! Lifecycle: uninitialized -> ready | permanently-failed.

use crate::backend::RenderBackend;
use crate::error::ExportError;
use std::sync::{Arc, OnceLock};

/// First-attempt-wins initialization cell.
#[derive(Debug, Default)]
pub struct InitState {
    outcome: OnceLock<Result<(), String>>,
}

impl InitState {
    pub const fn new() -> Self {
        Self {
            outcome: OnceLock::new(),
        }
    }

    /// Ensure the backend is initialized.
    ///
    /// Runs `backend.initialize()` on the first call only; afterwards this
    /// is a cheap read of the cached outcome. A failed first attempt is
    /// permanent for this state's lifetime and every later call reports the
    /// original cause.
    pub fn ensure<B: RenderBackend>(&self, backend: &B) -> Result<(), ExportError> {
        let outcome = self.outcome.get_or_init(|| {
            backend.initialize().map_err(|err| {
                tracing::warn!(error = %err, "rendering backend initialization failed");
                err.to_string()
            })
        });
        match outcome {
            Ok(()) => Ok(()),
            Err(cause) => Err(ExportError::BackendUnavailable(cause.clone())),
        }
    }

    /// Whether initialization has been attempted at all.
    pub fn is_attempted(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// Whether initialization succeeded.
    pub fn is_ready(&self) -> bool {
        matches!(self.outcome.get(), Some(Ok(())))
    }
}

/// The process-wide initialization state shared by all drivers by default.
pub fn global_init_state() -> Arc<InitState> {
    static GLOBAL_INIT: OnceLock<Arc<InitState>> = OnceLock::new();
    GLOBAL_INIT.get_or_init(|| Arc::new(InitState::new())).clone()
}
