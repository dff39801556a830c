//! Markdown rendering of a single section or appendix.
//!
//! The layout (leading newline, four-space indented template lines and a
//! trailing indented blank line) is the one every existing output document
//! carries, so it is reproduced exactly rather than tidied up.

use roxmltree::Node;

use crate::xml::{find_descendants, optional_text, text_content};

/// Heading shown when a leaf has no `HEAD`.
pub const NO_TITLE: &str = "NO TITLE";

/// Citation shown when a leaf has no `CITA`.
pub const NO_CITE: &str = "NO CITE";

const HEAD_TAG: &str = "HEAD";
const PARAGRAPH_TAG: &str = "P";
const CITATION_TAG: &str = "CITA";

/// Text extracted from a leaf node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafContent {
    pub heading: Option<String>,
    /// One entry per `P` element; `None` for a paragraph without text.
    pub paragraphs: Vec<Option<String>>,
    pub citation: Option<String>,
}

impl LeafContent {
    /// Extract heading, paragraphs and citation from a leaf node.
    pub fn from_node(node: Node<'_, '_>) -> Self {
        let paragraphs = find_descendants(node, PARAGRAPH_TAG)
            .map(text_content)
            .map(|text| if text.is_empty() { None } else { Some(text) })
            .collect();

        Self {
            heading: optional_text(node, HEAD_TAG),
            paragraphs,
            citation: optional_text(node, CITATION_TAG),
        }
    }

    /// Paragraph text joined by single newlines.
    ///
    /// An empty paragraph contributes a newline of its own, so
    /// `["A", "", "B"]` becomes `"A\n\n\nB"`.
    #[must_use]
    pub fn body(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.as_deref().unwrap_or("\n"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the fixed Markdown fragment.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let title = self.heading.as_deref().unwrap_or(NO_TITLE);
        let citation = self.citation.as_deref().unwrap_or(NO_CITE);
        format!(
            "\n    # {title}\n    \n    {}\n    \n    **{citation}**\n    ",
            self.body()
        )
    }
}

/// Render a leaf node as Markdown.
pub fn render_node(node: Node<'_, '_>) -> String {
    LeafContent::from_node(node).to_markdown()
}
