//! Form schema types
//!
//! Admin-configured, declarative descriptions of a form: a title plus an
//! ordered list of sections. Section authors have used several overlapping
//! conventions over time, so a section carries up to three field sources and
//! the engine applies a fixed precedence between them.

use crate::record::{auto_detect_keys, sub_object};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display title used when a schema supplies neither `title` nor `name`.
pub const FALLBACK_FORM_TITLE: &str = "Form";

/// A declarative, per-form-type section schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSchema {
    pub title: Option<String>,
    pub name: Option<String>,
    pub sections: Vec<SectionSchema>,
}

impl FormSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the internal form name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a section.
    pub fn add_section(mut self, section: SectionSchema) -> Self {
        self.sections.push(section);
        self
    }

    /// The form's display title: `title` over `name`, with a literal
    /// fallback when both are absent or empty.
    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_deref())
            .or_else(|| non_empty(self.name.as_deref()))
            .unwrap_or(FALLBACK_FORM_TITLE)
    }

    /// Parse a schema from a JSON string.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a schema from a JSON file.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// One logical group of related fields, or a consent block.
///
/// The three field-source conventions are not mutually exclusive; precedence
/// is `showFields`, then `fields`, then auto-detection from the client
/// record's matching sub-object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionSchema {
    pub title: Option<String>,
    pub name: Option<String>,
    pub section_type: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub show_fields: Vec<FieldRef>,
    pub fields: Vec<FieldDef>,
    pub consent_text: Option<String>,
    pub checkbox_label: Option<String>,
}

impl SectionSchema {
    /// Create an empty section with a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Set the section type key.
    pub fn with_section_type(mut self, section_type: impl Into<String>) -> Self {
        self.section_type = Some(section_type.into());
        self
    }

    /// Append an explicit `showFields` entry.
    pub fn show_field(mut self, field: impl Into<FieldRef>) -> Self {
        self.show_fields.push(field.into());
        self
    }

    /// Append an explicit `fields` entry.
    pub fn add_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// The section's display title: `title` over `name`, `None` when both
    /// are absent or empty.
    pub fn display_title(&self) -> Option<&str> {
        non_empty(self.title.as_deref()).or_else(|| non_empty(self.name.as_deref()))
    }

    /// Whether this is a consent section.
    ///
    /// Detected by an explicit `sectionType`/`type` of `consent`, a title
    /// containing "consent" or "privacy" (case-insensitive), or the presence
    /// of `consentText` or `checkboxLabel`. Consent sections never use the
    /// field-list machinery.
    pub fn is_consent(&self) -> bool {
        if self.section_type.as_deref() == Some("consent") || self.kind.as_deref() == Some("consent")
        {
            return true;
        }
        if let Some(title) = &self.title {
            let lower = title.to_lowercase();
            if lower.contains("consent") || lower.contains("privacy") {
                return true;
            }
        }
        self.consent_text.is_some() || self.checkbox_label.is_some()
    }

    /// Select this section's candidate fields by precedence.
    ///
    /// Non-empty `showFields` wins, then non-empty `fields`; otherwise
    /// fields are auto-detected from the record sub-object keyed by
    /// `sectionType` or `name` (first key whose value is an object), with
    /// candidate paths prefixed by that key so the same path resolves
    /// against either applicant's record.
    pub fn field_candidates(&self, record: &Value) -> Vec<FieldCandidate> {
        if !self.show_fields.is_empty() {
            return self
                .show_fields
                .iter()
                .map(|field| FieldCandidate::new(field.path(), field.label()))
                .collect();
        }
        if !self.fields.is_empty() {
            return self
                .fields
                .iter()
                .filter_map(|field| {
                    field
                        .path()
                        .map(|path| FieldCandidate::new(path, field.label.as_deref()))
                })
                .collect();
        }
        for key in [self.section_type.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
        {
            if let Some(map) = sub_object(record, key) {
                return auto_detect_keys(map)
                    .into_iter()
                    .map(|field| FieldCandidate::new(format!("{key}.{field}"), None))
                    .collect();
            }
        }
        Vec::new()
    }
}

/// A `showFields` entry: either a bare path or a path with an explicit label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldRef {
    Path(String),
    Labeled {
        name: String,
        #[serde(default)]
        label: Option<String>,
    },
}

impl FieldRef {
    pub fn path(&self) -> &str {
        match self {
            FieldRef::Path(path) => path,
            FieldRef::Labeled { name, .. } => name,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            FieldRef::Path(_) => None,
            FieldRef::Labeled { label, .. } => label.as_deref(),
        }
    }
}

impl From<&str> for FieldRef {
    fn from(path: &str) -> Self {
        FieldRef::Path(path.to_string())
    }
}

impl From<String> for FieldRef {
    fn from(path: String) -> Self {
        FieldRef::Path(path)
    }
}

/// A `fields` entry. The path key was written as `name`, `key`, or `id`
/// depending on the form's vintage; the first present one wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDef {
    pub name: Option<String>,
    pub key: Option<String>,
    pub id: Option<String>,
    pub label: Option<String>,
}

impl FieldDef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The field path: first present of `name`, `key`, `id`.
    pub fn path(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.key.as_deref())
            .or(self.id.as_deref())
    }
}

/// A normalized candidate field: a resolvable path plus a display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCandidate {
    pub path: String,
    pub label: String,
}

impl FieldCandidate {
    /// Normalize a path and optional explicit label. Without a label, the
    /// final path segment is expanded from camelCase to "Title Case".
    pub fn new(path: impl Into<String>, label: Option<&str>) -> Self {
        let path = path.into();
        let label = match label {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => expand_camel_case(final_segment(&path)),
        };
        Self { path, label }
    }
}

/// The last dot-separated segment of a path, with any bracket index removed.
fn final_segment(path: &str) -> &str {
    let segment = path.rsplit('.').next().unwrap_or(path);
    match segment.find('[') {
        Some(open) => &segment[..open],
        None => segment,
    }
}

/// Expand a camelCase identifier into "Title Case" words.
fn expand_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, ch) in s.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else {
            if ch.is_uppercase() {
                out.push(' ');
            }
            out.push(ch);
        }
    }
    out
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
