//! XML utility functions for navigating and extracting data from DOM trees.

use std::borrow::Cow;

use roxmltree::Node;

use crate::error::{ExtractorError, Result};

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use decisions_extractor::xml::get_tag_name;
///
/// let xml = r#"<DOCUMENT><NUM_DEC>09/01234</NUM_DEC></DOCUMENT>"#;
/// let doc = Document::parse(xml).unwrap();
/// let num = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(num), "NUM_DEC");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Get the tag name in `{namespace-uri}local` form, or the bare local name
/// when the element has no namespace.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use decisions_extractor::xml::expanded_tag_name;
///
/// let doc = Document::parse(r#"<a xmlns="urn:x"><b/></a>"#).unwrap();
/// assert_eq!(expanded_tag_name(doc.root_element()), "{urn:x}a");
/// ```
pub fn expanded_tag_name<'a>(node: Node<'a, '_>) -> Cow<'a, str> {
    let name = node.tag_name();
    match name.namespace() {
        Some(namespace) => Cow::Owned(format!("{{{namespace}}}{}", name.name())),
        None => Cow::Borrowed(name.name()),
    }
}

/// Find the first child element with the given tag name.
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `tag` - Tag name to search for
///
/// # Returns
/// First matching child element, or `None` if not found
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use decisions_extractor::xml::find_child;
///
/// let xml = r#"<root><child1/><child2/></root>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "child1").is_some());
/// assert!(find_child(root, "missing").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Walk a path of child tag names, failing on the first missing step.
///
/// # Arguments
/// * `node` - Starting node
/// * `path` - Tag names to descend through, in order
///
/// # Returns
/// The element at the end of the path, or `MissingElement` naming the
/// first absent tag and the element it was looked up in
pub fn descend<'a, 'input>(node: Node<'a, 'input>, path: &[&str]) -> Result<Node<'a, 'input>> {
    let mut current = node;

    for part in path {
        current = find_child(current, part).ok_or_else(|| ExtractorError::MissingElement {
            element: (*part).to_string(),
            context: format!("<{}>", get_tag_name(current)),
        })?;
    }

    Ok(current)
}

/// Text following an element up to its next sibling element.
///
/// Text nodes separated only by comments or processing instructions are
/// joined.
pub fn tail_text(node: Node<'_, '_>) -> String {
    std::iter::successors(node.next_sibling(), |sibling| sibling.next_sibling())
        .take_while(|sibling| !sibling.is_element())
        .filter(|sibling| sibling.is_text())
        .filter_map(|sibling| sibling.text())
        .collect()
}

/// Get all element children of a node.
///
/// # Returns
/// Iterator over element children (excludes text nodes, comments, etc.)
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Whether an element has no element children.
pub fn is_leaf(node: Node<'_, '_>) -> bool {
    element_children(node).next().is_none()
}
