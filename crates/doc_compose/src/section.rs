//! Section rendering
//!
//! Turns one section schema plus one or two client records into ordered row
//! descriptors. Fields absent on every applicant are dropped before rows are
//! built, so "Not provided" only ever appears when the other applicant has a
//! value for the same field.

use crate::format::{format_value, is_absent, NOT_PROVIDED};
use form_model::{resolve, ClientRecord, SectionSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder row text for a section with no resolvable data.
pub const EMPTY_SECTION_PLACEHOLDER: &str = "No data available for this section";

/// One formatted value with a presence tag.
///
/// `provided` drives display emphasis only; filtering happens before rows
/// are built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    pub provided: bool,
}

/// The renderer's unit of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Row {
    /// A label with one value (single mode) or two (dual mode).
    Field {
        label: String,
        primary: Cell,
        secondary: Option<Cell>,
    },
    /// Consent body text.
    ConsentText { text: String },
    /// Consent checkbox indicator.
    ConsentCheckbox { label: String },
    /// Placeholder for a section with no data.
    Placeholder { text: String },
}

/// Render one section against the applicant records.
///
/// Consent sections produce exactly a text row and a checkbox row and skip
/// the field-list machinery. Otherwise one field source is selected by
/// precedence and each candidate becomes a row unless it is absent on every
/// rendered applicant. A non-consent section with zero rows yields a single
/// placeholder row.
pub fn render_section(
    section: &SectionSchema,
    primary: &ClientRecord,
    secondary: Option<&ClientRecord>,
    dual: bool,
) -> Vec<Row> {
    if section.is_consent() {
        return consent_rows(section);
    }

    let mut rows = Vec::new();
    for candidate in section.field_candidates(primary) {
        let primary_value = resolve(primary, &candidate.path);
        let secondary_value = if dual {
            secondary.and_then(|record| resolve(record, &candidate.path))
        } else {
            None
        };
        if is_absent(primary_value) && (!dual || is_absent(secondary_value)) {
            continue;
        }
        let primary_cell = cell(primary_value, &candidate.path);
        let secondary_cell = dual.then(|| cell(secondary_value, &candidate.path));
        rows.push(Row::Field {
            label: candidate.label,
            primary: primary_cell,
            secondary: secondary_cell,
        });
    }

    if rows.is_empty() {
        rows.push(Row::Placeholder {
            text: EMPTY_SECTION_PLACEHOLDER.to_string(),
        });
    }
    rows
}

/// The consent text and checkbox label for a consent section, with
/// generated fallbacks referencing the section title.
pub fn consent_content(section: &SectionSchema) -> (String, String) {
    let title = section.display_title().unwrap_or("this agreement");
    let text = section
        .consent_text
        .clone()
        .unwrap_or_else(|| format!("Please review and accept the {title} terms below."));
    let checkbox = section
        .checkbox_label
        .clone()
        .unwrap_or_else(|| format!("I agree to the {title} terms"));
    (text, checkbox)
}

fn consent_rows(section: &SectionSchema) -> Vec<Row> {
    let (text, checkbox) = consent_content(section);
    vec![
        Row::ConsentText { text },
        Row::ConsentCheckbox { label: checkbox },
    ]
}

fn cell(value: Option<&Value>, field_name: &str) -> Cell {
    match value {
        Some(value) if !is_absent(Some(value)) => Cell {
            text: format_value(value, field_name),
            provided: true,
        },
        _ => Cell {
            text: NOT_PROVIDED.to_string(),
            provided: false,
        },
    }
}
