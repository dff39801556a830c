//! Lazy traversal of a title's hierarchy.
//!
//! `TitleWalker` turns a parsed full-title document into a sequence of
//! [`OutputDocument`]s, one per section (`DIV8`) or appendix (`DIV9`). The
//! walk performs no I/O; writing is left to [`crate::output::DocumentWriter`].
//!
//! Levels are visited in document order:
//!
//! ```text
//! DIV2 subtitle -> DIV3 chapter -> DIV4 subchapter -> DIV5 part -> DIV6 subpart -> DIV8 / DIV9
//! ```
//!
//! Each level is looked up among all descendants of its scope element. With
//! [`PartScope::Document`] the scope for parts and subparts is the whole
//! title, so every subchapter repeats every part and every part repeats every
//! subpart.

use std::iter;

use roxmltree::{Document, Node};

use crate::config::ecfr_url;
use crate::error::Result;
use crate::render::render_node;
use crate::types::{Ancestry, DocumentMetadata, HierarchyNode, LeafKind, Level, OutputDocument, PartScope};
use crate::xml::{find_descendants, get_tag_name, optional_text, required_attribute};

const TITLE_TAG: &str = "DIV1";
const CODE_ATTRIBUTE: &str = "N";
const HEAD_TAG: &str = "HEAD";

/// Boxed stream of documents produced by a walk.
pub type Documents<'a> = Box<dyn Iterator<Item = Result<OutputDocument>> + 'a>;

/// Walks one parsed title.
#[derive(Debug, Clone, Copy)]
pub struct TitleWalker<'a, 'input> {
    doc: &'a Document<'input>,
    title_number: u32,
    part_scope: PartScope,
}

impl<'a, 'input: 'a> TitleWalker<'a, 'input> {
    pub fn new(doc: &'a Document<'input>, title_number: u32) -> Self {
        Self {
            doc,
            title_number,
            part_scope: PartScope::default(),
        }
    }

    #[must_use]
    pub fn with_part_scope(mut self, scope: PartScope) -> Self {
        self.part_scope = scope;
        self
    }

    /// Heading of the `DIV1` title element, or empty if there is none.
    #[must_use]
    pub fn title_description(&self) -> String {
        self.doc
            .descendants()
            .find(|n| n.is_element() && get_tag_name(*n) == TITLE_TAG)
            .and_then(|title| optional_text(title, HEAD_TAG))
            .unwrap_or_default()
    }

    /// Start a fresh walk over the title.
    ///
    /// The returned iterator is lazy: nodes are rendered as it is advanced.
    /// An `Err` item means a hierarchy element was malformed; the walk
    /// continues past it, so consumers decide whether to stop.
    pub fn documents(self) -> Documents<'a> {
        let chain = Ancestry::new(self.title_number, self.title_description());
        tracing::debug!(
            title = self.title_number,
            description = %chain.title_description,
            scope = ?self.part_scope,
            "Walking title"
        );
        self.descend(self.doc.root(), Level::Subtitle, chain)
    }

    fn descend(self, scope: Node<'a, 'input>, level: Level, chain: Ancestry) -> Documents<'a> {
        Box::new(
            find_descendants(scope, level.tag()).flat_map(move |node| -> Documents<'a> {
                match hierarchy_node(node) {
                    Ok(current) => {
                        tracing::debug!(
                            level = ?level,
                            code = %current.code,
                            description = current.description.as_deref().unwrap_or_default(),
                            "Entering"
                        );
                        self.below(node, level, chain.with(level, current))
                    }
                    Err(e) => Box::new(iter::once(Err(e))),
                }
            }),
        )
    }

    fn below(self, node: Node<'a, 'input>, level: Level, chain: Ancestry) -> Documents<'a> {
        match level {
            Level::Subtitle => self.descend(node, Level::Chapter, chain),
            Level::Chapter => self.descend(node, Level::Subchapter, chain),
            Level::Subchapter => self.descend(self.part_scope_root(node), Level::Part, chain),
            Level::Part => self.descend(self.part_scope_root(node), Level::Subpart, chain),
            Level::Subpart => leaves(node, chain),
        }
    }

    fn part_scope_root(self, node: Node<'a, 'input>) -> Node<'a, 'input> {
        match self.part_scope {
            PartScope::Subchapter => node,
            PartScope::Document => self.doc.root(),
        }
    }
}

/// Sections of a subpart followed by its appendices.
fn leaves<'a, 'input: 'a>(subpart: Node<'a, 'input>, chain: Ancestry) -> Documents<'a> {
    let sections =
        find_descendants(subpart, LeafKind::Section.tag()).map(|node| (LeafKind::Section, node));
    let appendices =
        find_descendants(subpart, LeafKind::Appendix.tag()).map(|node| (LeafKind::Appendix, node));

    Box::new(
        sections
            .chain(appendices)
            .map(move |(kind, node)| build_document(&chain, kind, node)),
    )
}

fn hierarchy_node(node: Node<'_, '_>) -> Result<HierarchyNode> {
    let code = required_attribute(node, CODE_ATTRIBUTE)?;
    Ok(HierarchyNode::new(code, optional_text(node, HEAD_TAG)))
}

/// Build the output document for one leaf node.
pub fn build_document(chain: &Ancestry, kind: LeafKind, node: Node<'_, '_>) -> Result<OutputDocument> {
    let leaf = hierarchy_node(node)?;
    let url = ecfr_url(
        chain.title_number,
        &chain.subtitle.code,
        &chain.chapter.code,
        &chain.part.code,
        &chain.subpart.code,
        kind,
        &leaf.code,
    );

    let page_content = format!("{}\n\n__{url}__", render_node(node));
    let relative_path = chain
        .directory()
        .join(format!("{}.json", urlencoding::encode(&leaf.code)));

    Ok(OutputDocument {
        page_content,
        metadata: DocumentMetadata::new(chain, kind, &leaf, url),
        relative_path,
    })
}
