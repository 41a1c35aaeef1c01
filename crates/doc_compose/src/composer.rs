//! Document composition
//!
//! Assembles the title page, per-section blocks, and the signature page into
//! an ordered document tree. Composition is a single linear pass with two
//! forced page breaks: after the title page and before the signature page.

use crate::section::{render_section, Row};
use crate::tree::{
    Block, DocumentTree, EncodedImage, PageTemplate, RowLayout, SignatureBlock, TitleBlock,
};
use chrono::{DateTime, Local};
use form_model::{first_name, full_name, ClientRecord, FormSchema, SectionSchema};
use serde::{Deserialize, Serialize};

/// Brand identity stamped onto every generated document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandProfile {
    pub name: String,
    pub confidentiality_notice: String,
}

impl Default for BrandProfile {
    fn default() -> Self {
        Self {
            name: "Meridian Financial Advisory".to_string(),
            confidentiality_notice:
                "This document contains confidential client information.".to_string(),
        }
    }
}

impl BrandProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_confidentiality_notice(mut self, notice: impl Into<String>) -> Self {
        self.confidentiality_notice = notice.into();
        self
    }
}

/// Requested applicant layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantMode {
    Single,
    Dual,
}

/// Assembles document trees from a schema and applicant records.
#[derive(Debug, Clone, Default)]
pub struct DocumentComposer {
    brand: BrandProfile,
    generated_at: Option<DateTime<Local>>,
}

impl DocumentComposer {
    pub fn new(brand: BrandProfile) -> Self {
        Self {
            brand,
            generated_at: None,
        }
    }

    /// Pin the generation timestamp for reproducible output.
    pub fn with_generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn brand(&self) -> &BrandProfile {
        &self.brand
    }

    /// Compose the full document tree.
    ///
    /// Dual layout applies only when requested and a secondary record is
    /// actually present; otherwise the document degrades to single-applicant
    /// layout. Sections whose resolved title is empty, `"undefined"`, or
    /// `"0"` are skipped entirely.
    pub fn compose(
        &self,
        schema: &FormSchema,
        primary: &ClientRecord,
        secondary: Option<&ClientRecord>,
        signature: Option<&EncodedImage>,
        logo: Option<&EncodedImage>,
        mode: ApplicantMode,
    ) -> DocumentTree {
        let dual = mode == ApplicantMode::Dual && secondary.is_some();
        let now = self.generated_at.unwrap_or_else(Local::now);
        let form_title = schema.display_title().to_string();

        let mut blocks = Vec::with_capacity(schema.sections.len() * 2 + 4);
        blocks.push(Block::Title(self.title_block(
            schema, primary, secondary, logo, dual, now,
        )));
        blocks.push(Block::PageBreak);

        if dual {
            if let Some(secondary) = secondary {
                blocks.push(Block::ApplicantHeader {
                    primary: first_name(primary).unwrap_or("Applicant 1").to_string(),
                    secondary: first_name(secondary).unwrap_or("Applicant 2").to_string(),
                });
            }
        }

        for section in &schema.sections {
            self.push_section_blocks(&mut blocks, section, primary, secondary, dual);
        }

        blocks.push(Block::PageBreak);
        blocks.push(Block::Signature(SignatureBlock {
            signature: signature.cloned(),
            date: now.format("%-m/%-d/%Y").to_string(),
            client_name: full_name(primary),
            secondary_client_name: if dual { secondary.map(full_name) } else { None },
        }));

        DocumentTree {
            page_template: PageTemplate {
                brand: self.brand.name.clone(),
                form_title,
                confidentiality_notice: self.brand.confidentiality_notice.clone(),
                page_numbers: true,
                skip_first_page: true,
            },
            blocks,
        }
    }

    fn title_block(
        &self,
        schema: &FormSchema,
        primary: &ClientRecord,
        secondary: Option<&ClientRecord>,
        logo: Option<&EncodedImage>,
        dual: bool,
        now: DateTime<Local>,
    ) -> TitleBlock {
        let client_names = match secondary {
            Some(secondary) if dual => {
                format!("{} & {}", full_name(primary), full_name(secondary))
            }
            _ => full_name(primary),
        };
        TitleBlock {
            logo: logo.cloned(),
            brand: self.brand.name.clone(),
            form_title: schema.display_title().to_string(),
            badge: if dual {
                "DUAL APPLICATION".to_string()
            } else {
                "SINGLE APPLICATION".to_string()
            },
            client_names,
            generated_at: now.format("%-m/%-d/%Y, %-I:%M %p").to_string(),
        }
    }

    fn push_section_blocks(
        &self,
        blocks: &mut Vec<Block>,
        section: &SectionSchema,
        primary: &ClientRecord,
        secondary: Option<&ClientRecord>,
        dual: bool,
    ) {
        let title = section.display_title().unwrap_or("");
        if title.is_empty() || title == "undefined" || title == "0" {
            return;
        }
        blocks.push(Block::SectionHeader {
            title: title.to_string(),
        });

        let rows = render_section(section, primary, secondary, dual);
        if section.is_consent() {
            let mut text = String::new();
            let mut checkbox_label = String::new();
            for row in rows {
                match row {
                    Row::ConsentText { text: t } => text = t,
                    Row::ConsentCheckbox { label } => checkbox_label = label,
                    _ => {}
                }
            }
            blocks.push(Block::Consent {
                text,
                checkbox_label,
            });
        } else {
            blocks.push(Block::RowStack {
                layout: if dual {
                    RowLayout::FourColumn
                } else {
                    RowLayout::TwoColumn
                },
                rows,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Cell;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_composer() -> DocumentComposer {
        let ts = Local.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap();
        DocumentComposer::new(BrandProfile::default()).with_generated_at(ts)
    }

    fn sample_schema() -> FormSchema {
        FormSchema::from_json_str(
            r#"{
                "title": "Financial Analysis",
                "sections": [
                    { "title": "Income", "showFields": ["incomeDetails[0].grossIncome"] },
                    { "title": "", "showFields": ["ignored"] },
                    { "title": "undefined", "showFields": ["ignored"] },
                    { "title": "0", "showFields": ["ignored"] },
                    { "title": "Data Privacy", "sectionType": "consent" }
                ]
            }"#,
        )
        .unwrap()
    }

    fn anna() -> ClientRecord {
        json!({
            "firstName": "Anna",
            "lastName": "Schmidt",
            "incomeDetails": [{ "grossIncome": 75000 }]
        })
    }

    fn ben() -> ClientRecord {
        json!({
            "firstName": "Ben",
            "lastName": "Weber",
            "incomeDetails": [{ "grossIncome": 41000 }]
        })
    }

    #[test]
    fn test_single_mode_structure() {
        let tree = fixed_composer().compose(&sample_schema(), &anna(), None, None, None, ApplicantMode::Single);

        assert!(matches!(tree.blocks[0], Block::Title(_)));
        assert!(matches!(tree.blocks[1], Block::PageBreak));
        assert_eq!(tree.section_titles(), vec!["Income", "Data Privacy"]);
        assert_eq!(tree.page_break_count(), 2);
        assert!(matches!(tree.blocks.last(), Some(Block::Signature(_))));
    }

    #[test]
    fn test_title_block_contents() {
        let tree = fixed_composer().compose(&sample_schema(), &anna(), None, None, None, ApplicantMode::Single);
        let Block::Title(title) = &tree.blocks[0] else {
            panic!("expected title block");
        };
        assert_eq!(title.form_title, "Financial Analysis");
        assert_eq!(title.badge, "SINGLE APPLICATION");
        assert_eq!(title.client_names, "Anna Schmidt");
        assert_eq!(title.generated_at, "3/5/2024, 10:30 AM");
        assert!(title.logo.is_none());
    }

    #[test]
    fn test_dual_mode_structure() {
        let ben = ben();
        let tree = fixed_composer().compose(&sample_schema(), &anna(), Some(&ben), None, None, ApplicantMode::Dual);

        let Block::Title(title) = &tree.blocks[0] else {
            panic!("expected title block");
        };
        assert_eq!(title.badge, "DUAL APPLICATION");
        assert_eq!(title.client_names, "Anna Schmidt & Ben Weber");

        assert_eq!(
            tree.blocks[2],
            Block::ApplicantHeader {
                primary: "Anna".to_string(),
                secondary: "Ben".to_string(),
            }
        );

        let row_stack = tree
            .blocks
            .iter()
            .find_map(|block| match block {
                Block::RowStack { layout, rows } => Some((*layout, rows.clone())),
                _ => None,
            })
            .unwrap();
        assert_eq!(row_stack.0, RowLayout::FourColumn);
        assert_eq!(
            row_stack.1[0],
            Row::Field {
                label: "Gross Income".to_string(),
                primary: Cell {
                    text: "€75,000".to_string(),
                    provided: true
                },
                secondary: Some(Cell {
                    text: "€41,000".to_string(),
                    provided: true
                }),
            }
        );

        let Some(Block::Signature(signature)) = tree.blocks.last() else {
            panic!("expected signature block");
        };
        assert_eq!(signature.client_name, "Anna Schmidt");
        assert_eq!(signature.secondary_client_name.as_deref(), Some("Ben Weber"));
        assert_eq!(signature.date, "3/5/2024");
    }

    #[test]
    fn test_applicant_header_fallback_names() {
        let primary = json!({ "incomeDetails": [{ "grossIncome": 1 }] });
        let secondary = json!({});
        let tree = fixed_composer().compose(
            &sample_schema(),
            &primary,
            Some(&secondary),
            None,
            None,
            ApplicantMode::Dual,
        );
        assert_eq!(
            tree.blocks[2],
            Block::ApplicantHeader {
                primary: "Applicant 1".to_string(),
                secondary: "Applicant 2".to_string(),
            }
        );
    }

    #[test]
    fn test_dual_without_secondary_degrades_to_single() {
        let composer = fixed_composer();
        let dual = composer.compose(&sample_schema(), &anna(), None, None, None, ApplicantMode::Dual);
        let single = composer.compose(&sample_schema(), &anna(), None, None, None, ApplicantMode::Single);
        assert_eq!(dual, single);
    }

    #[test]
    fn test_unrenderable_titles_skipped() {
        let tree = fixed_composer().compose(&sample_schema(), &anna(), None, None, None, ApplicantMode::Single);
        assert_eq!(tree.section_titles(), vec!["Income", "Data Privacy"]);
    }

    #[test]
    fn test_consent_block_composed() {
        let tree = fixed_composer().compose(&sample_schema(), &anna(), None, None, None, ApplicantMode::Single);
        let consent = tree
            .blocks
            .iter()
            .find_map(|block| match block {
                Block::Consent {
                    text,
                    checkbox_label,
                } => Some((text.clone(), checkbox_label.clone())),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            consent.0,
            "Please review and accept the Data Privacy terms below."
        );
        assert_eq!(consent.1, "I agree to the Data Privacy terms");
    }

    #[test]
    fn test_assets_attached() {
        let logo = EncodedImage::new("image/png", vec![1]);
        let signature = EncodedImage::new("image/png", vec![2]);
        let tree = fixed_composer().compose(
            &sample_schema(),
            &anna(),
            None,
            Some(&signature),
            Some(&logo),
            ApplicantMode::Single,
        );
        let Block::Title(title) = &tree.blocks[0] else {
            panic!("expected title block");
        };
        assert_eq!(title.logo.as_ref(), Some(&logo));
        let Some(Block::Signature(block)) = tree.blocks.last() else {
            panic!("expected signature block");
        };
        assert_eq!(block.signature.as_ref(), Some(&signature));
    }

    #[test]
    fn test_page_template_chrome() {
        let tree = fixed_composer().compose(&sample_schema(), &anna(), None, None, None, ApplicantMode::Single);
        assert_eq!(tree.page_template.brand, BrandProfile::default().name);
        assert_eq!(tree.page_template.form_title, "Financial Analysis");
        assert!(tree.page_template.page_numbers);
        assert!(tree.page_template.skip_first_page);
    }
}
