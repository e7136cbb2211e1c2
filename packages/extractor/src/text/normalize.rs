//! Text normalization of serialized decision bodies.
//!
//! Three passes run in a fixed order: tag stripping, entity repair and
//! character repair. All passes are plain string rewriting; the markup is
//! never parsed a second time, so broken or half-escaped tags are removed
//! as well as well-formed ones.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::SchemaId;

/// A bracketed tag token, opening or closing, on a single line.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TAG_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.+?>").expect("valid regex"));

/// A digit followed by a mis-decoded euro sign.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DIGIT_BEFORE_EURO_ARTIFACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)\s*¿").expect("valid regex"));

/// Entity substitutions, applied one after the other on the running text.
///
/// Order matters: `&gt;` must go before `gt;`, and `&amp;amp;` before
/// `&amp;`. The `&#156; ` pattern includes its trailing space.
pub const ENTITY_REPAIRS: [(&str, &str); 12] = [
    ("&#128;", "€"),
    ("&#149;", "•"),
    ("&#156; ", "oe"),
    ("&#133;", "..."),
    ("&#13;", ""),
    ("&#150;", "_"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("/spangt;", ""),
    ("gt;", "-"),
    ("&amp;amp;", "&"),
    ("&amp;", "&"),
];

/// Normalize a serialized decision body into plain text.
///
/// # Examples
/// ```
/// use decisions_extractor::text::normalize;
/// use decisions_extractor::types::SchemaId;
///
/// assert_eq!(normalize("<p>10&#128;</p>", SchemaId::JuriCa), "10€");
/// assert_eq!(normalize("<p>a</p>", SchemaId::Capp), "\na\n");
/// ```
pub fn normalize(markup: &str, schema: SchemaId) -> String {
    let text = strip_tags(markup, schema);
    let text = repair_entities(&text);
    repair_unicode(&text)
}

/// Pass 1: remove every distinct tag token found in the markup.
///
/// CAPP replaces each token with a line break, the other databases drop
/// it. Tokens are replaced as literal substrings, in order of first
/// appearance.
pub fn strip_tags(markup: &str, schema: SchemaId) -> String {
    let replacement = if schema.strips_tags_to_newline() {
        "\n"
    } else {
        ""
    };

    let mut result = markup.to_string();
    for token in distinct_tag_tokens(markup) {
        result = result.replace(&token, replacement);
    }
    result
}

/// Distinct tag tokens of the markup, in order of first appearance.
fn distinct_tag_tokens(markup: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    TAG_TOKEN
        .find_iter(markup)
        .map(|m| m.as_str())
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

/// Pass 2: substitute mis-encoded HTML/XML entities.
///
/// Each rule rewrites the output of the previous one, so a rule can match
/// text produced by an earlier rule.
pub fn repair_entities(text: &str) -> String {
    ENTITY_REPAIRS
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            acc.replace(pattern, replacement)
        })
}

/// Pass 3: repair characters mangled by a wrong single-byte decoding.
pub fn repair_unicode(text: &str) -> String {
    let text = text.replace('\u{a0}', " ").replace('\u{80}', "€");
    let text = DIGIT_BEFORE_EURO_ARTIFACT.replace_all(&text, "${1} €");
    text.replace("\n¿ ", " -")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_tags_capp_newlines() {
        assert_eq!(strip_tags("<A>hello</A>", SchemaId::Capp), "\nhello\n");
    }

    #[test]
    fn test_strip_tags_jurica_ariane_removed() {
        assert_eq!(strip_tags("<A>hello</A>", SchemaId::JuriCa), "hello");
        assert_eq!(strip_tags("<A>hello</A>", SchemaId::Ariane), "hello");
    }

    #[test]
    fn test_strip_tags_every_occurrence() {
        assert_eq!(
            strip_tags("<p>un</p><br/><p>deux</p><br/>", SchemaId::Capp),
            "\nun\n\n\ndeux\n\n"
        );
    }

    #[test]
    fn test_strip_tags_with_attributes() {
        assert_eq!(
            strip_tags(r#"<p class="x">a</p><p class="y">b</p>"#, SchemaId::JuriCa),
            "ab"
        );
    }

    #[test]
    fn test_strip_tags_keeps_escaped_markup() {
        // Escaped angle brackets are not tags yet; entity repair restores them
        assert_eq!(
            strip_tags("<a>&lt;br&gt;</a>", SchemaId::JuriCa),
            "&lt;br&gt;"
        );
    }

    #[test]
    fn test_strip_tags_does_not_span_lines() {
        assert_eq!(strip_tags("a <\n b> c", SchemaId::JuriCa), "a <\n b> c");
    }

    #[test]
    fn test_strip_tags_malformed_token() {
        assert_eq!(strip_tags("x <<b>> y", SchemaId::JuriCa), "x > y");
    }

    #[test]
    fn test_distinct_tag_tokens_order() {
        assert_eq!(
            distinct_tag_tokens("<a><b></b><a></a>"),
            vec!["<a>", "<b>", "</b>", "</a>"]
        );
    }

    #[test]
    fn test_repair_entities_table() {
        assert_eq!(repair_entities("10 &#128;"), "10 €");
        assert_eq!(repair_entities("&#149; point"), "• point");
        assert_eq!(repair_entities("c&#156; ur"), "coeur");
        assert_eq!(repair_entities("etc&#133;"), "etc...");
        assert_eq!(repair_entities("ligne&#13;"), "ligne");
        assert_eq!(repair_entities("2010&#150;2011"), "2010_2011");
        assert_eq!(repair_entities("a &lt; b"), "a < b");
        assert_eq!(repair_entities("a &gt; b"), "a > b");
        assert_eq!(repair_entities("x/spangt;y"), "xy");
        assert_eq!(repair_entities("agt;b"), "a-b");
        assert_eq!(repair_entities("A &amp; B"), "A & B");
    }

    #[test]
    fn test_repair_entities_trailing_space_required() {
        assert_eq!(repair_entities("c&#156;ur"), "c&#156;ur");
    }

    #[test]
    fn test_repair_entities_cascade() {
        assert_eq!(repair_entities("&amp;amp;test"), "&test");
        assert_eq!(repair_entities("&amp;amp;amp;"), "&");
        // "gt;" rewrites before "&amp;" collapses
        assert_eq!(repair_entities("&amp;gt;"), "&-");
        // "&amp;lt;" only becomes "&lt;" after the "&lt;" rule has run
        assert_eq!(repair_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_repair_entities_stable_on_repaired_text() {
        let once = repair_entities("&amp;amp;test");
        assert_eq!(repair_entities(&once), once);
    }

    #[test]
    fn test_repair_unicode_nbsp_and_c1_euro() {
        assert_eq!(repair_unicode("a\u{a0}b"), "a b");
        assert_eq!(repair_unicode("10\u{80}"), "10€");
    }

    #[test]
    fn test_repair_unicode_digit_euro_artifact() {
        assert_eq!(repair_unicode("1500¿"), "1500 €");
        assert_eq!(repair_unicode("1500   ¿ HT"), "1500 € HT");
        assert_eq!(repair_unicode("1500\u{a0}¿"), "1500 €");
    }

    #[test]
    fn test_repair_unicode_bullet_artifact() {
        assert_eq!(repair_unicode("liste :\n¿ premier"), "liste : -premier");
    }

    #[test]
    fn test_repair_unicode_lone_artifact_untouched() {
        assert_eq!(repair_unicode("pourquoi ¿"), "pourquoi ¿");
    }

    #[test]
    fn test_normalize_capp() {
        let markup = "<CONTENU><p>Condamne à payer 1500\u{a0}&#128;</p></CONTENU>";
        assert_eq!(
            normalize(markup, SchemaId::Capp),
            "\n\nCondamne à payer 1500 €\n\n"
        );
    }

    #[test]
    fn test_normalize_jurica_escaped_markup() {
        let markup = "<TEXTE_ARRET>L&amp;apos;arr&amp;ecirc;t &amp;amp; la &lt;b&gt;cour&lt;/b&gt;</TEXTE_ARRET>";
        assert_eq!(
            normalize(markup, SchemaId::JuriCa),
            "L&apos;arr&ecirc;t & la <b>cour</b>"
        );
    }

    #[test]
    fn test_normalize_ariane() {
        let markup = "<Texte_Integral><p>Vu la requête&#133;</p><p>\n¿ article 1</p></Texte_Integral>";
        assert_eq!(
            normalize(markup, SchemaId::Ariane),
            "Vu la requête... -article 1"
        );
    }
}
