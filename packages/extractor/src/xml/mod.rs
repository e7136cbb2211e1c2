//! XML reading, navigation and serialization.

mod loader;
mod serialize;
mod utils;

pub use loader::{decode_xml_bytes, load_xml, parse_document};
pub use serialize::{serialize_node, serialize_with_tail};
pub use utils::{
    descend, element_children, expanded_tag_name, find_child, get_tag_name, is_leaf, tail_text,
};
