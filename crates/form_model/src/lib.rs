//! Form Model
//!
//! This crate provides the data model for the advisory-form document engine:
//! declarative form schemas, loosely typed client records, and safe
//! field-path resolution.
//!
//! # Features
//!
//! - Form/section schemas deserialized from admin-supplied JSON, covering the
//!   three historical field-source conventions (`showFields`, `fields`,
//!   auto-detection) with a fixed precedence
//! - Consent-section detection
//! - Dot/bracket field-path resolution that treats every traversal step as
//!   optional and never fails
//! - Label derivation (camelCase to "Title Case") for unlabeled fields
//!
//! # Example
//!
//! ```rust
//! use form_model::{resolve, FormSchema};
//! use serde_json::json;
//!
//! let schema = FormSchema::from_json_str(r#"{
//!     "title": "Financial Analysis",
//!     "sections": [{ "title": "Income", "showFields": ["incomeDetails[0].grossIncome"] }]
//! }"#).unwrap();
//! assert_eq!(schema.display_title(), "Financial Analysis");
//!
//! let record = json!({ "incomeDetails": [{ "grossIncome": 75000 }] });
//! let candidates = schema.sections[0].field_candidates(&record);
//! assert_eq!(candidates[0].label, "Gross Income");
//! assert_eq!(resolve(&record, &candidates[0].path), Some(&json!(75000)));
//! ```

mod error;
mod path;
mod record;
mod schema;

pub use error::{Result, SchemaError};
pub use path::resolve;
pub use record::{auto_detect_keys, first_name, full_name, sub_object, ClientRecord};
pub use schema::{
    FieldCandidate, FieldDef, FieldRef, FormSchema, SectionSchema, FALLBACK_FORM_TITLE,
};
