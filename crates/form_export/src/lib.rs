//! Form Export
//!
//! This crate orchestrates document export and preview for the advisory-form
//! engine: the rendering-backend contract, its one-time process-wide
//! initialization, brand-logo resolution, and the export driver that ties
//! schema + records + composer + backend together.
//!
//! # Features
//!
//! - `RenderBackend` trait consumed as a black box (download and preview
//!   output modes)
//! - First-attempt-wins initialization state: a failed asset-table load is
//!   permanent for the process lifetime and reported, never retried
//! - Asynchronous logo resolution that degrades to "no logo" on failure
//! - Outcome-valued `export_document` / `preview_document`: failures are
//!   reported in the result, never thrown
//!
//! # Example
//!
//! ```ignore
//! use form_export::ExportDriver;
//!
//! let driver = ExportDriver::new(backend);
//! let outcome = driver
//!     .export_document(&schema, &primary, None, None, ApplicantMode::Single, None)
//!     .await;
//! assert!(outcome.is_success());
//! ```

mod assets;
mod backend;
mod driver;
mod error;
mod init;

pub use assets::{AssetError, EmbeddedLogo, LogoSource};
pub use backend::{BackendError, OutputMode, RenderBackend};
pub use driver::{default_filename, ExportDriver, ExportOutcome};
pub use error::ExportError;
pub use init::{global_init_state, InitState};
