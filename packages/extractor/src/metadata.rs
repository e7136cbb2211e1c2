//! Metadata harvesting: flatten a decision's tag tree into leaf-tag → text.
//!
//! The traversal is depth-first in document order. The schema's body element
//! is pruned, since its text is handled by the text pipeline.
//!
//! Children are resolved by tag name rather than visited individually: each
//! child is looked up again as the first sibling carrying the same tag. With
//! duplicate sibling tags every lookup lands on the first occurrence, so
//! repeated blocks contribute the first block's values only.

use roxmltree::Node;

use crate::error::{ExtractorError, Result};
use crate::types::{MetadataRecord, SchemaId};
use crate::xml::{element_children, expanded_tag_name, is_leaf};

/// Extract the metadata record of a document rooted at `root`.
///
/// # Arguments
/// * `root` - Element to start from (usually the document root element)
/// * `schema` - Source database, which decides the pruned body tag
///
/// # Returns
/// One entry per reachable leaf element, keyed by tag name (`{uri}name`
/// for namespaced elements), holding the
/// trimmed text (empty when the leaf has no text). Later leaves overwrite
/// earlier ones with the same tag.
///
/// # Errors
/// `TagNotFound` if a child cannot be resolved by its tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use decisions_extractor::metadata::extract_metadata;
/// use decisions_extractor::types::SchemaId;
///
/// let xml = "<DOCUMENT><META><NUM> 12/345 </NUM></META><TEXTE_ARRET>...</TEXTE_ARRET></DOCUMENT>";
/// let doc = Document::parse(xml).unwrap();
/// let record = extract_metadata(doc.root_element(), SchemaId::JuriCa).unwrap();
/// assert_eq!(record.get("NUM"), Some("12/345"));
/// assert_eq!(record.len(), 1);
/// ```
pub fn extract_metadata(root: Node<'_, '_>, schema: SchemaId) -> Result<MetadataRecord> {
    let mut record = MetadataRecord::new();
    let tag = expanded_tag_name(root);

    if tag == schema.body_tag() {
        return Ok(record);
    }

    if is_leaf(root) {
        record.insert(tag, leaf_text(root));
        return Ok(record);
    }

    for child in element_children(root) {
        let resolved = first_with_same_tag(root, child).ok_or_else(|| {
            ExtractorError::TagNotFound {
                tag_name: expanded_tag_name(child).into_owned(),
                parent: tag.to_string(),
            }
        })?;
        record.merge(extract_metadata(resolved, schema)?);
    }

    Ok(record)
}

/// First element child of `parent` whose expanded tag name equals `child`'s.
fn first_with_same_tag<'a, 'input>(
    parent: Node<'a, 'input>,
    child: Node<'a, 'input>,
) -> Option<Node<'a, 'input>> {
    element_children(parent).find(|candidate| candidate.tag_name() == child.tag_name())
}

/// Trimmed text of a leaf element.
///
/// Text split by comments or processing instructions is joined back.
fn leaf_text(node: Node<'_, '_>) -> String {
    let text: String = node
        .children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect();
    text.trim().to_string()
}
