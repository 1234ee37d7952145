//! Document model produced by the extractor
//!
//! Every piece of body text exists twice: a clean variant with citation
//! markers stripped, and an annotated variant with merged citation groups.
//! The content sequence pairs are built together and split only at the
//! end, so both variants always hold the same block kinds in the same order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Which of the two text variants to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Clean,
    Annotated,
}

/// Same text in both variants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualText {
    pub clean: String,
    #[serde(rename = "with_citations")]
    pub annotated: String,
}

impl DualText {
    #[must_use]
    pub fn new(clean: impl Into<String>, annotated: impl Into<String>) -> Self {
        Self { clean: clean.into(), annotated: annotated.into() }
    }

    /// Text that carries no citations, identical in both variants
    #[must_use]
    pub fn uniform(text: impl Into<String>) -> Self {
        let text = text.into();
        Self { annotated: text.clone(), clean: text }
    }

    #[must_use]
    pub fn get(&self, variant: Variant) -> &str {
        match variant {
            Variant::Clean => &self.clean,
            Variant::Annotated => &self.annotated,
        }
    }

    /// Empty when the clean variant is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clean.is_empty()
    }
}

/// Insertion-ordered attribute map with unique names.
///
/// Re-inserting a name replaces its value but keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DualMap {
    entries: Vec<(String, DualText)>,
}

impl DualMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: DualText) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DualText> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DualText)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for DualMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DualMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DualMapVisitor;

        impl<'de> Visitor<'de> for DualMapVisitor {
            type Value = DualMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to dual text values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<DualMap, A::Error> {
                let mut map = DualMap::new();
                while let Some((name, value)) = access.next_entry::<String, DualText>()? {
                    map.insert(name, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(DualMapVisitor)
    }
}

/// One table-of-contents line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// 0 when the entry carries no level marker
    pub level: u32,
    pub text: String,
}

/// Header row plus data rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}

/// Block kind without payload, used to compare variant structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    OrderedItem,
    UnorderedItem,
    Table,
}

/// One classified unit of the document body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    /// Text still starts with its own `N.`; the renderer consumes it
    OrderedItem { text: String },
    UnorderedItem { text: String },
    Table(TableData),
}

impl ContentBlock {
    #[must_use]
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Heading { level, .. } => BlockKind::Heading(*level),
            Self::Paragraph { .. } => BlockKind::Paragraph,
            Self::OrderedItem { .. } => BlockKind::OrderedItem,
            Self::UnorderedItem { .. } => BlockKind::UnorderedItem,
            Self::Table(_) => BlockKind::Table,
        }
    }

    /// Text payload of non-table blocks
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Heading { text, .. }
            | Self::Paragraph { text }
            | Self::OrderedItem { text }
            | Self::UnorderedItem { text } => Some(text),
            Self::Table(_) => None,
        }
    }
}

/// Clean and annotated content sequences of equal length and kinds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDualBlocks")]
pub struct DualBlocks {
    clean: Vec<ContentBlock>,
    #[serde(rename = "with_citations")]
    annotated: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct RawDualBlocks {
    clean: Vec<ContentBlock>,
    #[serde(rename = "with_citations")]
    annotated: Vec<ContentBlock>,
}

impl TryFrom<RawDualBlocks> for DualBlocks {
    type Error = String;

    fn try_from(raw: RawDualBlocks) -> Result<Self, Self::Error> {
        let parallel = raw.clean.len() == raw.annotated.len()
            && raw.clean.iter().zip(&raw.annotated).all(|(c, a)| c.kind() == a.kind());
        if parallel {
            Ok(Self { clean: raw.clean, annotated: raw.annotated })
        } else {
            Err("clean and annotated content sequences differ in structure".to_string())
        }
    }
}

impl DualBlocks {
    /// Build both sequences from per-block pairs.
    ///
    /// Pairs must hold the same block kind; the extractor guarantees it by
    /// construction and this asserts it in debug builds.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(ContentBlock, ContentBlock)>) -> Self {
        debug_assert!(pairs.iter().all(|(c, a)| c.kind() == a.kind()));
        let (clean, annotated) = pairs.into_iter().unzip();
        Self { clean, annotated }
    }

    #[must_use]
    pub fn clean(&self) -> &[ContentBlock] {
        &self.clean
    }

    #[must_use]
    pub fn annotated(&self) -> &[ContentBlock] {
        &self.annotated
    }

    #[must_use]
    pub fn get(&self, variant: Variant) -> &[ContentBlock] {
        match variant {
            Variant::Clean => &self.clean,
            Variant::Annotated => &self.annotated,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clean.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clean.is_empty()
    }
}

/// One bibliography entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// 1-based list position, or the citation number for synthesized entries
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub ref_date: String,
}

/// Fully assembled entry page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub short_description: String,
    #[serde(rename = "abstract")]
    pub abstract_text: DualText,
    pub info_box: DualMap,
    pub toc: Vec<TocEntry>,
    pub content: DualBlocks,
    pub references: Vec<Reference>,
}

impl Document {
    /// Every table of one variant in source order
    pub fn tables(&self, variant: Variant) -> impl Iterator<Item = &TableData> {
        self.content.get(variant).iter().filter_map(|block| match block {
            ContentBlock::Table(table) => Some(table),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dual_map_keeps_first_position_last_value() {
        let mut map = DualMap::new();
        map.insert("Founded", DualText::uniform("1987"));
        map.insert("HQ", DualText::uniform("Shenzhen"));
        map.insert("Founded", DualText::new("1987年", "1987年[1]"));

        let names: Vec<&str> = map.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["Founded", "HQ"]);
        assert_eq!(map.get("Founded").map(|v| v.annotated.as_str()), Some("1987年[1]"));
    }

    #[test]
    fn test_dual_map_serializes_in_insertion_order() -> Result<(), serde_json::Error> {
        let mut map = DualMap::new();
        map.insert("z", DualText::uniform("1"));
        map.insert("a", DualText::uniform("2"));
        let json = serde_json::to_string(&map)?;
        assert!(json.find("\"z\"") < json.find("\"a\""));

        let back: DualMap = serde_json::from_str(&json)?;
        assert_eq!(back, map);
        Ok(())
    }

    #[test]
    fn test_dual_blocks_rejects_mismatched_structure() {
        let json = r#"{
            "clean": [{"type": "paragraph", "text": "a"}],
            "with_citations": [{"type": "unordered_item", "text": "a"}]
        }"#;
        assert!(serde_json::from_str::<DualBlocks>(json).is_err());

        let short = r#"{"clean": [{"type": "paragraph", "text": "a"}], "with_citations": []}"#;
        assert!(serde_json::from_str::<DualBlocks>(short).is_err());
    }

    #[test]
    fn test_tables_side_channel() {
        let table = TableData { headers: vec!["A".into()], rows: vec![vec!["1".into()]] };
        let doc = Document {
            content: DualBlocks::from_pairs(vec![
                (
                    ContentBlock::Paragraph { text: "p".into() },
                    ContentBlock::Paragraph { text: "p[1]".into() },
                ),
                (ContentBlock::Table(table.clone()), ContentBlock::Table(table.clone())),
            ]),
            ..Document::default()
        };

        let tables: Vec<&TableData> = doc.tables(Variant::Clean).collect();
        assert_eq!(tables, [&table]);
        assert_eq!(doc.tables(Variant::Annotated).count(), 1);
    }

    #[test]
    fn test_block_serialization_shape() -> Result<(), serde_json::Error> {
        let block = ContentBlock::Heading { level: 2, text: "History".into() };
        let value = serde_json::to_value(&block)?;
        assert_eq!(value["type"], "heading");
        assert_eq!(value["level"], 2);
        Ok(())
    }
}
