//! Locating the decision body inside a parsed document.

use roxmltree::Node;

use crate::error::Result;
use crate::types::SchemaId;
use crate::xml::{descend, serialize_with_tail};

/// Find the element holding the decision body.
///
/// The path is fixed per database, starting below `root`:
/// - CAPP: `TEXTE/BLOC_TEXTUEL/CONTENU`
/// - JuriCa: `TEXTE_ARRET`
/// - Ariane: `Decision/Texte_Integral`
///
/// # Errors
/// `MissingElement` naming the first tag of the path that is absent.
pub fn locate_body<'a, 'input>(
    root: Node<'a, 'input>,
    schema: SchemaId,
) -> Result<Node<'a, 'input>> {
    descend(root, schema.body_path())
}

/// Locate the decision body and serialize it back to markup.
///
/// The text following the body element, up to its next sibling element,
/// is part of the markup.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use decisions_extractor::text::extract_body_markup;
/// use decisions_extractor::types::SchemaId;
///
/// let xml = "<DOCUMENT><TEXTE_ARRET>Attendu que<br/>...</TEXTE_ARRET></DOCUMENT>";
/// let doc = Document::parse(xml).unwrap();
/// let markup = extract_body_markup(doc.root_element(), SchemaId::JuriCa).unwrap();
/// assert_eq!(markup, "<TEXTE_ARRET>Attendu que<br/>...</TEXTE_ARRET>");
/// ```
pub fn extract_body_markup(root: Node<'_, '_>, schema: SchemaId) -> Result<String> {
    let body = locate_body(root, schema)?;
    serialize_with_tail(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractorError;
    use crate::xml::get_tag_name;
    use roxmltree::Document;

    #[test]
    fn test_locate_body_capp() {
        let xml = "<DOCUMENT><TEXTE><BLOC_TEXTUEL><CONTENU>x</CONTENU></BLOC_TEXTUEL></TEXTE></DOCUMENT>";
        let doc = Document::parse(xml).unwrap();
        let body = locate_body(doc.root_element(), SchemaId::Capp).unwrap();
        assert_eq!(get_tag_name(body), "CONTENU");
    }

    #[test]
    fn test_locate_body_jurica_direct_child_only() {
        let xml = "<DOCUMENT><META><TEXTE_ARRET>nested</TEXTE_ARRET></META></DOCUMENT>";
        let doc = Document::parse(xml).unwrap();
        let err = locate_body(doc.root_element(), SchemaId::JuriCa).unwrap_err();
        assert!(matches!(err, ExtractorError::MissingElement { .. }));
    }

    #[test]
    fn test_locate_body_ariane() {
        let xml = "<Document><Decision><Texte_Integral>x</Texte_Integral></Decision></Document>";
        let doc = Document::parse(xml).unwrap();
        let body = locate_body(doc.root_element(), SchemaId::Ariane).unwrap();
        assert_eq!(get_tag_name(body), "Texte_Integral");
    }

    #[test]
    fn test_locate_body_capp_missing_bloc_textuel() {
        let xml = "<DOCUMENT><TEXTE><CONTENU>x</CONTENU></TEXTE></DOCUMENT>";
        let doc = Document::parse(xml).unwrap();
        let err = locate_body(doc.root_element(), SchemaId::Capp).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required XML element: BLOC_TEXTUEL in <TEXTE>"
        );
    }

    #[test]
    fn test_locate_body_root_is_not_searched() {
        // The path starts below the root, so a body-tag root does not match
        let xml = "<TEXTE><BLOC_TEXTUEL><CONTENU>x</CONTENU></BLOC_TEXTUEL></TEXTE>";
        let doc = Document::parse(xml).unwrap();
        assert!(locate_body(doc.root_element(), SchemaId::Capp).is_err());
    }

    #[test]
    fn test_extract_body_markup_keeps_attributes() {
        let xml = r#"<Document><Decision><Texte_Integral><p class="c1">Vu</p></Texte_Integral></Decision></Document>"#;
        let doc = Document::parse(xml).unwrap();
        let markup = extract_body_markup(doc.root_element(), SchemaId::Ariane).unwrap();
        assert_eq!(
            markup,
            r#"<Texte_Integral><p class="c1">Vu</p></Texte_Integral>"#
        );
    }

    #[test]
    fn test_extract_body_markup_includes_tail() {
        let xml = "<DOCUMENT>\n<TEXTE_ARRET>Attendu</TEXTE_ARRET>\n  <FIN/>\n</DOCUMENT>";
        let doc = Document::parse(xml).unwrap();
        let markup = extract_body_markup(doc.root_element(), SchemaId::JuriCa).unwrap();
        assert_eq!(markup, "<TEXTE_ARRET>Attendu</TEXTE_ARRET>\n  ");
    }
}
