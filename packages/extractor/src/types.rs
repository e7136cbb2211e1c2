//! Core data types for the extractor.
//!
//! These types describe the three supported court-record databases and the
//! flat metadata records harvested from their XML exports.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ExtractorError;

/// Source database of a batch of decision XML files.
///
/// Each database exports a different XML schema, which drives where the
/// decision body lives and how its markup is stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaId {
    /// CAPP (decisions of the courts of appeal).
    Capp,

    /// JuriCa (civil decisions of the courts of appeal).
    JuriCa,

    /// Ariane (decisions of the administrative courts).
    Ariane,
}

impl SchemaId {
    /// All supported databases, in canonical order.
    pub const ALL: [SchemaId; 3] = [Self::Capp, Self::JuriCa, Self::Ariane];

    /// Canonical identifier, as accepted on the command line.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Capp => "CAPP",
            Self::JuriCa => "JuriCa",
            Self::Ariane => "Ariane",
        }
    }

    /// Tag of the element holding the full decision text.
    ///
    /// The subtree below this tag is excluded from metadata.
    #[must_use]
    pub fn body_tag(&self) -> &'static str {
        match self {
            Self::Capp => "TEXTE",
            Self::JuriCa => "TEXTE_ARRET",
            Self::Ariane => "Texte_Integral",
        }
    }

    /// Tag path from the document root down to the decision body.
    #[must_use]
    pub fn body_path(&self) -> &'static [&'static str] {
        match self {
            Self::Capp => &["TEXTE", "BLOC_TEXTUEL", "CONTENU"],
            Self::JuriCa => &["TEXTE_ARRET"],
            Self::Ariane => &["Decision", "Texte_Integral"],
        }
    }

    /// Whether stripped tags are replaced by a line break instead of nothing.
    #[must_use]
    pub fn strips_tags_to_newline(&self) -> bool {
        matches!(self, Self::Capp)
    }
}

impl FromStr for SchemaId {
    type Err = ExtractorError;

    /// Parse a database identifier. Matching is exact and case-sensitive.
    ///
    /// # Examples
    /// ```
    /// use decisions_extractor::types::SchemaId;
    ///
    /// assert_eq!("JuriCa".parse::<SchemaId>().unwrap(), SchemaId::JuriCa);
    /// assert!("jurica".parse::<SchemaId>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|schema| schema.as_str() == s)
            .ok_or_else(|| {
                ExtractorError::Config(format!("The database {s} is not supported yet"))
            })
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat leaf-tag → leaf-text mapping harvested from one document.
///
/// Keys keep the position of their first insertion; re-inserting a key
/// overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetadataRecord {
    fields: Map<String, Value>,
}

impl MetadataRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value for the same tag.
    pub fn insert(&mut self, tag: impl Into<String>, text: impl Into<String>) {
        self.fields.insert(tag.into(), Value::String(text.into()));
    }

    /// Merge another record into this one. Later values win on collision.
    pub fn merge(&mut self, other: MetadataRecord) {
        for (tag, value) in other.fields {
            self.fields.insert(tag, value);
        }
    }

    /// Look up the text of a leaf tag.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.fields.get(tag).and_then(Value::as_str)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over the tags in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterate over `(tag, text)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(tag, value)| (tag.as_str(), value.as_str().unwrap_or_default()))
    }
}
