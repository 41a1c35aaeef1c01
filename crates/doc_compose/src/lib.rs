//! Document Composition
//!
//! This crate turns a declarative form schema plus one or two client records
//! into an ordered, backend-agnostic document tree: title page, per-section
//! label/value rows, consent blocks, and a closing signature page.
//!
//! # Features
//!
//! - Locale-sensitive value formatting with a keyword-based currency
//!   heuristic (preserved verbatim; existing documents depend on it)
//! - Per-section row rendering with per-field omission of absent values
//! - Single- and dual-applicant layout composition with explicit forced
//!   page breaks and per-page chrome metadata
//!
//! # Example
//!
//! ```rust
//! use doc_compose::{ApplicantMode, BrandProfile, DocumentComposer};
//! use form_model::FormSchema;
//! use serde_json::json;
//!
//! let schema = FormSchema::from_json_str(r#"{
//!     "title": "Financial Analysis",
//!     "sections": [{ "title": "Income", "showFields": ["incomeDetails[0].grossIncome"] }]
//! }"#).unwrap();
//! let record = json!({ "firstName": "Anna", "incomeDetails": [{ "grossIncome": 75000 }] });
//!
//! let composer = DocumentComposer::new(BrandProfile::default());
//! let tree = composer.compose(&schema, &record, None, None, None, ApplicantMode::Single);
//! assert_eq!(tree.section_titles(), vec!["Income"]);
//! ```

mod composer;
mod format;
mod section;
mod tree;

pub use composer::{ApplicantMode, BrandProfile, DocumentComposer};
pub use format::{format_value, is_absent, is_currency_field, NOT_PROVIDED};
pub use section::{consent_content, render_section, Cell, Row, EMPTY_SECTION_PLACEHOLDER};
pub use tree::{
    Block, DocumentTree, EncodedImage, PageTemplate, RowLayout, SignatureBlock, TitleBlock,
};
