//! Tag parsing.
//!
//! Tags live in the spreadsheet as a single comma-separated cell
//! (`primaryTags`). That cell is parsed exactly once, when a record is
//! deserialized, into a [`Tags`] list. Everything downstream (cards, filters,
//! chat prompts) reads the parsed list, so a card never shows a tag that the
//! tag filter would not match.
//!
//! ## Parsing Rules
//!
//! - Split on `,`
//! - Trim whitespace around each token
//! - Drop empty tokens
//!
//! No case folding or punctuation normalization happens: `Rust` and `rust`
//! are different tags.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator used when writing tags back to the sheet.
pub const TAG_JOINER: &str = ", ";

/// Parses a raw comma-separated tag cell.
///
/// ```
/// use recallapp::tags::parse_tags;
/// assert_eq!(parse_tags("a, b ,c,,"), vec!["a", "b", "c"]);
/// ```
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ordered tag list of one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn parse(raw: &str) -> Self {
        Self(parse_tags(raw))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The sheet representation: tokens joined by `", "`.
    pub fn to_cell(&self) -> String {
        self.0.join(TAG_JOINER)
    }
}

impl From<Vec<String>> for Tags {
    fn from(tags: Vec<String>) -> Self {
        // Route through the parser so hand-built lists obey the same rules.
        Self::parse(&tags.join(","))
    }
}

impl<'a> IntoIterator for &'a Tags {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Tags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_cell())
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = crate::model::deserialize_cell(deserializer)?;
        Ok(Tags::parse(&raw))
    }
}
