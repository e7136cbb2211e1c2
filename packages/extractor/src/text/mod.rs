//! Text extraction: locate the decision body and normalize it to plain text.

mod locate;
mod normalize;

pub use locate::{extract_body_markup, locate_body};
pub use normalize::{normalize, repair_entities, repair_unicode, strip_tags, ENTITY_REPAIRS};

use roxmltree::Node;

use crate::error::Result;
use crate::types::SchemaId;

/// Extract the normalized body text of a document rooted at `root`.
pub fn extract_text(root: Node<'_, '_>, schema: SchemaId) -> Result<String> {
    let markup = extract_body_markup(root, schema)?;
    Ok(normalize(&markup, schema))
}
