//! Core data types for the harvester.
//!
//! These types represent the CFR hierarchy as it appears in the eCFR
//! full-title XML, and the JSON documents produced per section or appendix.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which date of a title to resolve from the title listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateChoice {
    /// Date of the most recent published issue.
    LatestIssueDate,
    /// Date of the most recent amendment.
    LatestAmendedOn,
}

impl DateChoice {
    /// Field name in the title listing JSON.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LatestIssueDate => "latest_issue_date",
            Self::LatestAmendedOn => "latest_amended_on",
        }
    }
}

/// One entry of the versioner title listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSummary {
    pub number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub latest_amended_on: Option<String>,
    #[serde(default)]
    pub latest_issue_date: Option<String>,
    #[serde(default)]
    pub up_to_date_as_of: Option<String>,
    #[serde(default)]
    pub reserved: bool,
}

impl TitleSummary {
    /// The date selected by `choice`, if the listing has one.
    #[must_use]
    pub fn date(&self, choice: DateChoice) -> Option<&str> {
        match choice {
            DateChoice::LatestIssueDate => self.latest_issue_date.as_deref(),
            DateChoice::LatestAmendedOn => self.latest_amended_on.as_deref(),
        }
    }
}

/// Body of the versioner `/titles` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TitleListing {
    pub titles: Vec<TitleSummary>,
}

/// Where parts and subparts are searched while walking a title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartScope {
    /// Parts inside the current subchapter, subparts inside the current part.
    #[default]
    Subchapter,
    /// Every part and subpart of the whole title, re-scanned for each
    /// subchapter and part. Matches the legacy harvester output, duplicated
    /// documents included.
    Document,
}

/// Kind of leaf node that produces a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    Section,
    Appendix,
}

impl LeafKind {
    /// XML element carrying this kind of leaf.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Section => "DIV8",
            Self::Appendix => "DIV9",
        }
    }

    /// Path segment used by the eCFR viewer.
    #[must_use]
    pub fn url_segment(&self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::Appendix => "appendix",
        }
    }
}

/// Containment levels between the title and its leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Subtitle,
    Chapter,
    Subchapter,
    Part,
    Subpart,
}

impl Level {
    /// XML element for this level.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Subtitle => "DIV2",
            Self::Chapter => "DIV3",
            Self::Subchapter => "DIV4",
            Self::Part => "DIV5",
            Self::Subpart => "DIV6",
        }
    }

    /// Directory name prefix in the output tree.
    #[must_use]
    pub fn dir_prefix(&self) -> &'static str {
        match self {
            Self::Subtitle => "subtitle",
            Self::Chapter => "chap",
            Self::Subchapter => "subchapt",
            Self::Part => "part",
            Self::Subpart => "subpart",
        }
    }
}

/// A node in the hierarchy: its `N` code and optional heading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyNode {
    pub code: String,
    pub description: Option<String>,
}

impl HierarchyNode {
    #[must_use]
    pub fn new(code: impl Into<String>, description: Option<String>) -> Self {
        Self {
            code: code.into(),
            description,
        }
    }

    /// Description as written to metadata; empty when the node has no heading.
    #[must_use]
    pub fn description_or_empty(&self) -> String {
        self.description.clone().unwrap_or_default()
    }
}

/// The chain of ancestors above a leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ancestry {
    pub title_number: u32,
    pub title_description: String,
    pub subtitle: HierarchyNode,
    pub chapter: HierarchyNode,
    pub subchapter: HierarchyNode,
    pub part: HierarchyNode,
    pub subpart: HierarchyNode,
}

impl Ancestry {
    /// Start a chain at the title.
    #[must_use]
    pub fn new(title_number: u32, title_description: impl Into<String>) -> Self {
        Self {
            title_number,
            title_description: title_description.into(),
            ..Self::default()
        }
    }

    /// Copy of this chain with `level` set to `node`.
    #[must_use]
    pub fn with(&self, level: Level, node: HierarchyNode) -> Self {
        let mut chain = self.clone();
        match level {
            Level::Subtitle => chain.subtitle = node,
            Level::Chapter => chain.chapter = node,
            Level::Subchapter => chain.subchapter = node,
            Level::Part => chain.part = node,
            Level::Subpart => chain.subpart = node,
        }
        chain
    }

    /// Output directory for leaves under this chain, relative to the output root.
    ///
    /// Every code is percent-encoded so that codes containing `/` or spaces
    /// still map to a single path component.
    #[must_use]
    pub fn directory(&self) -> PathBuf {
        let mut dir = PathBuf::from(format!("title_{}", self.title_number));
        for (level, node) in [
            (Level::Subtitle, &self.subtitle),
            (Level::Chapter, &self.chapter),
            (Level::Subchapter, &self.subchapter),
            (Level::Part, &self.part),
            (Level::Subpart, &self.subpart),
        ] {
            dir.push(format!(
                "{}_{}",
                level.dir_prefix(),
                urlencoding::encode(&node.code)
            ));
        }
        dir
    }
}

/// Metadata block of an output document.
///
/// Field order is the key order of the written JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title_number: u32,
    pub title_description: String,
    pub subtitle_number: String,
    pub subtitle_description: String,
    pub chapter_number: String,
    pub chapter_description: String,
    pub subchapter_number: String,
    pub subchapter_description: String,
    pub part_number: String,
    pub part_description: String,
    pub sub_part_number: String,
    pub sub_part_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appendix_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appendix_description: Option<String>,
    pub url: String,
}

impl DocumentMetadata {
    /// Build the metadata for a leaf under `chain`.
    #[must_use]
    pub fn new(chain: &Ancestry, kind: LeafKind, leaf: &HierarchyNode, url: String) -> Self {
        let (code, description) = (Some(leaf.code.clone()), Some(leaf.description_or_empty()));
        let ((section_number, section_description), (appendix_number, appendix_description)) =
            match kind {
                LeafKind::Section => ((code, description), (None, None)),
                LeafKind::Appendix => ((None, None), (code, description)),
            };

        Self {
            title_number: chain.title_number,
            title_description: chain.title_description.clone(),
            subtitle_number: chain.subtitle.code.clone(),
            subtitle_description: chain.subtitle.description_or_empty(),
            chapter_number: chain.chapter.code.clone(),
            chapter_description: chain.chapter.description_or_empty(),
            subchapter_number: chain.subchapter.code.clone(),
            subchapter_description: chain.subchapter.description_or_empty(),
            part_number: chain.part.code.clone(),
            part_description: chain.part.description_or_empty(),
            sub_part_number: chain.subpart.code.clone(),
            sub_part_description: chain.subpart.description_or_empty(),
            section_number,
            section_description,
            appendix_number,
            appendix_description,
            url,
        }
    }
}

/// One section or appendix, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub page_content: String,
    pub metadata: DocumentMetadata,

    /// Location relative to the output root.
    #[serde(skip)]
    pub relative_path: PathBuf,
}

/// Where the title XML was obtained from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlSource {
    Cache,
    Remote,
}

impl XmlSource {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Remote => "remote",
        }
    }
}

/// Outcome of harvesting one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSummary {
    pub title_number: u32,
    pub title_description: String,
    pub source: XmlSource,
    pub documents_written: usize,
    pub output_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chain() -> Ancestry {
        Ancestry::new(29, "Labor")
            .with(Level::Subtitle, HierarchyNode::new("B", None))
            .with(
                Level::Chapter,
                HierarchyNode::new("XVII", Some("OSHA".to_string())),
            )
            .with(Level::Subchapter, HierarchyNode::new("A", None))
            .with(Level::Part, HierarchyNode::new("1910", None))
            .with(Level::Subpart, HierarchyNode::new("Z", None))
    }

    #[test]
    fn test_date_choice_field_names() {
        assert_eq!(DateChoice::LatestIssueDate.as_str(), "latest_issue_date");
        assert_eq!(DateChoice::LatestAmendedOn.as_str(), "latest_amended_on");
    }

    #[test]
    fn test_title_summary_date() {
        let summary = TitleSummary {
            number: 29,
            name: "Labor".to_string(),
            latest_amended_on: Some("2024-04-01".to_string()),
            latest_issue_date: Some("2024-05-01".to_string()),
            up_to_date_as_of: None,
            reserved: false,
        };
        assert_eq!(summary.date(DateChoice::LatestIssueDate), Some("2024-05-01"));
        assert_eq!(summary.date(DateChoice::LatestAmendedOn), Some("2024-04-01"));
    }

    #[test]
    fn test_ancestry_directory() {
        assert_eq!(
            sample_chain().directory(),
            PathBuf::from("title_29/subtitle_B/chap_XVII/subchapt_A/part_1910/subpart_Z")
        );
    }

    #[test]
    fn test_ancestry_directory_escapes_codes() {
        let chain = sample_chain().with(Level::Subpart, HierarchyNode::new("A/B 1", None));
        assert!(chain.directory().ends_with("subpart_A%2FB%201"));
        assert_eq!(chain.directory().components().count(), 6);
    }

    #[test]
    fn test_metadata_section_fields() {
        let leaf = HierarchyNode::new("1910.1", None);
        let metadata = DocumentMetadata::new(
            &sample_chain(),
            LeafKind::Section,
            &leaf,
            "https://example.com".to_string(),
        );

        assert_eq!(metadata.section_number.as_deref(), Some("1910.1"));
        assert_eq!(metadata.section_description.as_deref(), Some(""));
        assert!(metadata.appendix_number.is_none());
        assert_eq!(metadata.chapter_description, "OSHA");
        assert_eq!(metadata.subtitle_description, "");
    }

    #[test]
    fn test_metadata_appendix_serialization() {
        let leaf = HierarchyNode::new("A", Some("Appendix A".to_string()));
        let metadata = DocumentMetadata::new(
            &sample_chain(),
            LeafKind::Appendix,
            &leaf,
            "https://example.com".to_string(),
        );

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["appendix_number"], "A");
        assert_eq!(json["appendix_description"], "Appendix A");
        assert_eq!(json["title_number"], 29);
        assert!(json.get("section_number").is_none());
    }
}
