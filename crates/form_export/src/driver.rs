//! Export driver
//!
//! Thin orchestration over the composer and the rendering backend: ensure
//! the backend's one-time initialization, resolve the brand logo, compose
//! the document tree, and hand it to the backend for download or preview.
//! All failures are reported in the returned outcome value, never thrown.

use crate::assets::{EmbeddedLogo, LogoSource};
use crate::backend::{OutputMode, RenderBackend};
use crate::init::{global_init_state, InitState};
use chrono::Local;
use doc_compose::{ApplicantMode, BrandProfile, DocumentComposer, EncodedImage};
use form_model::{first_name, ClientRecord, FormSchema};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The result value of an export or preview call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOutcome {
    pub success: bool,
    /// The materialized filename; download mode only.
    pub filename: Option<String>,
    pub error: Option<String>,
}

impl ExportOutcome {
    pub fn completed(filename: impl Into<String>) -> Self {
        Self {
            success: true,
            filename: Some(filename.into()),
            error: None,
        }
    }

    pub fn previewed() -> Self {
        Self {
            success: true,
            filename: None,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            filename: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// Orchestrates document export and preview against a rendering backend.
pub struct ExportDriver<B, L = EmbeddedLogo> {
    backend: B,
    logo_source: L,
    composer: DocumentComposer,
    init: Arc<InitState>,
}

impl<B: RenderBackend> ExportDriver<B, EmbeddedLogo> {
    /// Create a driver with the default embedded logo source and the
    /// process-wide initialization state.
    pub fn new(backend: B) -> Self {
        Self::with_logo_source(backend, EmbeddedLogo)
    }
}

impl<B: RenderBackend, L: LogoSource> ExportDriver<B, L> {
    pub fn with_logo_source(backend: B, logo_source: L) -> Self {
        Self {
            backend,
            logo_source,
            composer: DocumentComposer::default(),
            init: global_init_state(),
        }
    }

    /// Replace the composer (brand profile, pinned timestamp).
    pub fn with_composer(mut self, composer: DocumentComposer) -> Self {
        self.composer = composer;
        self
    }

    /// Set the brand profile, keeping the rest of the composer defaults.
    pub fn with_brand(mut self, brand: BrandProfile) -> Self {
        self.composer = DocumentComposer::new(brand);
        self
    }

    /// Use an isolated initialization state instead of the process-wide one.
    pub fn with_init_state(mut self, init: Arc<InitState>) -> Self {
        self.init = init;
        self
    }

    /// Export a document for download.
    ///
    /// When `filename` is absent one is derived from the form title and the
    /// primary client's first name, suffixed with today's ISO date.
    pub async fn export_document(
        &self,
        schema: &FormSchema,
        primary: &ClientRecord,
        secondary: Option<&ClientRecord>,
        signature: Option<&EncodedImage>,
        mode: ApplicantMode,
        filename: Option<String>,
    ) -> ExportOutcome {
        if let Err(err) = self.init.ensure(&self.backend) {
            return ExportOutcome::failed(err.to_string());
        }
        let logo = self.resolve_logo().await;
        let tree = self
            .composer
            .compose(schema, primary, secondary, signature, logo.as_ref(), mode);
        let filename = filename.unwrap_or_else(|| default_filename(schema, primary));
        tracing::debug!(filename = %filename, blocks = tree.blocks.len(), "exporting document");
        let output = OutputMode::Download {
            filename: filename.clone(),
        };
        match self.backend.render(&tree, &output) {
            Ok(()) => ExportOutcome::completed(filename),
            Err(err) => {
                tracing::warn!(error = %err, "document export failed");
                ExportOutcome::failed(err.to_string())
            }
        }
    }

    /// Open a document in the interactive viewer.
    pub async fn preview_document(
        &self,
        schema: &FormSchema,
        primary: &ClientRecord,
        secondary: Option<&ClientRecord>,
        signature: Option<&EncodedImage>,
        mode: ApplicantMode,
    ) -> ExportOutcome {
        if let Err(err) = self.init.ensure(&self.backend) {
            return ExportOutcome::failed(err.to_string());
        }
        let logo = self.resolve_logo().await;
        let tree = self
            .composer
            .compose(schema, primary, secondary, signature, logo.as_ref(), mode);
        tracing::debug!(blocks = tree.blocks.len(), "previewing document");
        match self.backend.render(&tree, &OutputMode::Preview) {
            Ok(()) => ExportOutcome::previewed(),
            Err(err) => {
                tracing::warn!(error = %err, "document preview failed");
                ExportOutcome::failed(err.to_string())
            }
        }
    }

    /// Resolve the brand logo, degrading to no logo on failure.
    async fn resolve_logo(&self) -> Option<EncodedImage> {
        match self.logo_source.fetch().await {
            Ok(logo) => Some(logo),
            Err(err) => {
                tracing::warn!(error = %err, "logo unavailable, continuing without it");
                None
            }
        }
    }
}

/// Default download filename: `{title|name|"form"}_{firstName|"client"}_{date}.pdf`.
pub fn default_filename(schema: &FormSchema, primary: &ClientRecord) -> String {
    let form = schema
        .title
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| schema.name.as_deref().filter(|s| !s.is_empty()))
        .unwrap_or("form");
    let client = first_name(primary).unwrap_or("client");
    format!("{}_{}_{}.pdf", form, client, Local::now().format("%Y-%m-%d"))
}
