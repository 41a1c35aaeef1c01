//! Rendering backend contract
//!
//! The engine hands a composed document tree to an external document-layout
//! library and never looks inside it. The backend's only obligations are a
//! one-time asset-table load and a render call supporting download and
//! interactive preview.

use doc_compose::DocumentTree;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the rendering backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The embedded asset table could not be loaded
    #[error("asset table unavailable: {0}")]
    AssetTable(String),

    /// Materialization of a document tree failed
    #[error("render failed: {0}")]
    Render(String),

    /// IO error writing the materialized output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a materialized document is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum OutputMode {
    /// Write a file with the given name.
    Download { filename: String },
    /// Open in an interactive viewer.
    Preview,
}

/// An external document-layout backend.
///
/// `initialize` loads the backend's embedded asset table and is invoked at
/// most once per process (see [`crate::InitState`]); `render` materializes a
/// tree. Implementations own all page-break and font-embedding behavior.
pub trait RenderBackend {
    fn initialize(&self) -> Result<(), BackendError>;
    fn render(&self, tree: &DocumentTree, output: &OutputMode) -> Result<(), BackendError>;
}
