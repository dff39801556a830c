//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::Node;

use crate::error::{HarvesterError, Result};

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use ecfr_harvester::xml::get_tag_name;
///
/// let xml = r#"<DIV5 N="1910"><HEAD>Part 1910</HEAD></DIV5>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "DIV5");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find all descendant elements with the given tag name, in document order.
///
/// The starting node itself is never included.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use ecfr_harvester::xml::find_descendants;
///
/// let xml = r#"<DIV5><DIV6><DIV8/></DIV6><DIV6><DIV8/><DIV8/></DIV6></DIV5>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let sections: Vec<_> = find_descendants(doc.root_element(), "DIV8").collect();
/// assert_eq!(sections.len(), 3);
/// ```
pub fn find_descendants<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .filter(move |n| n.is_element() && get_tag_name(*n) == tag)
}

/// Find the first descendant element with the given tag name.
pub fn find_first_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .find(|n| n.is_element() && get_tag_name(*n) == tag)
}

/// Concatenated text of all text nodes under `node`, untrimmed.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use ecfr_harvester::xml::text_content;
///
/// let xml = r#"<P>(a) <I>Scope.</I> This part applies.</P>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(text_content(doc.root_element()), "(a) Scope. This part applies.");
/// ```
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Text of the first `tag` descendant, or `None` if there is no such
/// element or it holds only whitespace.
pub fn optional_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    find_first_descendant(node, tag)
        .map(text_content)
        .filter(|text| !text.trim().is_empty())
}

/// Get a required attribute value.
///
/// # Errors
/// `HarvesterError::MissingAttribute` if the attribute is absent.
pub fn required_attribute<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name)
        .ok_or_else(|| HarvesterError::MissingAttribute {
            attribute: name.to_string(),
            element: get_tag_name(node).to_string(),
        })
}
