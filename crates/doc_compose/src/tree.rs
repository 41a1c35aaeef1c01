//! Document tree
//!
//! The engine's output: an ordered, backend-agnostic list of renderable
//! blocks plus page-template metadata. The rendering backend owns all
//! pixel-level layout; this tree only fixes order, grouping, and the two
//! forced page breaks.

use crate::section::Row;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// An embeddable binary image asset (logo, signature).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub mime: String,
    pub data: Vec<u8>,
}

impl EncodedImage {
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }

    /// The image as a `data:` URI for backends that embed assets inline.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.data))
    }
}

/// Per-page chrome applied by the backend on every page except the first:
/// a brand/title header and a confidentiality/page-number footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTemplate {
    pub brand: String,
    pub form_title: String,
    pub confidentiality_notice: String,
    /// Render "Page X of Y" in the footer.
    pub page_numbers: bool,
    /// Suppress header and footer on the title page.
    pub skip_first_page: bool,
}

/// Row-stack column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowLayout {
    /// Label / value.
    TwoColumn,
    /// Label / value-A / spacer / value-B.
    FourColumn,
}

/// The title page contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleBlock {
    pub logo: Option<EncodedImage>,
    pub brand: String,
    pub form_title: String,
    /// "SINGLE APPLICATION" or "DUAL APPLICATION".
    pub badge: String,
    /// "A" or "A & B" in dual mode.
    pub client_names: String,
    pub generated_at: String,
}

/// The closing signature page contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureBlock {
    /// Client signature image; a blank signature line when absent.
    pub signature: Option<EncodedImage>,
    pub date: String,
    pub client_name: String,
    /// Secondary applicant's signature line, dual mode only.
    pub secondary_client_name: Option<String>,
}

/// One opaque renderable block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
    Title(TitleBlock),
    /// Forced page break.
    PageBreak,
    /// Dual-mode header naming the two applicants.
    ApplicantHeader { primary: String, secondary: String },
    SectionHeader { title: String },
    RowStack { layout: RowLayout, rows: Vec<Row> },
    Consent { text: String, checkbox_label: String },
    Signature(SignatureBlock),
}

/// An ordered document tree ready for the rendering backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTree {
    pub page_template: PageTemplate,
    pub blocks: Vec<Block>,
}

impl DocumentTree {
    /// Number of forced page breaks in the tree.
    pub fn page_break_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|block| matches!(block, Block::PageBreak))
            .count()
    }

    /// Titles of all section headers, in document order.
    pub fn section_titles(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::SectionHeader { title } => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri() {
        let image = EncodedImage::new("image/png", vec![1, 2, 3]);
        assert_eq!(image.data_uri(), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_tree_serializes_with_block_tags() {
        let tree = DocumentTree {
            page_template: PageTemplate {
                brand: "Brand".to_string(),
                form_title: "Form".to_string(),
                confidentiality_notice: "Confidential".to_string(),
                page_numbers: true,
                skip_first_page: true,
            },
            blocks: vec![
                Block::PageBreak,
                Block::SectionHeader {
                    title: "Income".to_string(),
                },
            ],
        };
        let json = serde_json::to_string(&tree).unwrap();
        assert!(json.contains(r#""block":"page_break""#));
        assert!(json.contains(r#""block":"section_header""#));

        let parsed: DocumentTree = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_tree_helpers() {
        let tree = DocumentTree {
            page_template: PageTemplate {
                brand: String::new(),
                form_title: String::new(),
                confidentiality_notice: String::new(),
                page_numbers: true,
                skip_first_page: true,
            },
            blocks: vec![
                Block::PageBreak,
                Block::SectionHeader {
                    title: "Income".to_string(),
                },
                Block::PageBreak,
            ],
        };
        assert_eq!(tree.page_break_count(), 2);
        assert_eq!(tree.section_titles(), vec!["Income"]);
    }
}
