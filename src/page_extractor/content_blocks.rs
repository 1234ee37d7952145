//! Content body classification.
//!
//! Only direct `div`/`ol`/`ul` children of the content container are
//! considered. Each child yields zero or more (clean, annotated) block pairs;
//! a child that fails contributes nothing to either side.

use super::citation::CitationNormalizer;
use super::html_node::HtmlNode;
use super::schema::{ContentBlock, DualBlocks};
use super::table::extract_table;
use crate::config::{BlockSignatures, ExtractConfig};
use crate::error::{ExtractError, ExtractResult};
use crate::extract_events::{ExtractionEvent, ExtractionObserver};
use crate::utils::{normalize_whitespace, split_ordered_numeral};

type BlockPair = (ContentBlock, ContentBlock);

const BLOCK_CONTAINER_TAGS: [&str; 3] = ["div", "ol", "ul"];

/// Structural role of one content child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildSignature {
    Heading,
    Paragraph,
    OrderedList,
    UnorderedList,
    Table,
}

impl ChildSignature {
    /// First matching signature, checked in a fixed order
    pub fn classify<'a, N: HtmlNode<'a>>(node: &N, blocks: &BlockSignatures) -> Option<Self> {
        if node.has_class(&blocks.heading_class) {
            Some(Self::Heading)
        } else if node.has_class(&blocks.paragraph_class) {
            Some(Self::Paragraph)
        } else if node.has_class(&blocks.ordered_list_class) {
            Some(Self::OrderedList)
        } else if node.has_class(&blocks.unordered_list_class) {
            Some(Self::UnorderedList)
        } else if node
            .attribute(&blocks.table_module_attr)
            .is_some_and(|value| value.contains(blocks.table_module_value.as_str()))
        {
            Some(Self::Table)
        } else {
            None
        }
    }
}

/// Heading level from the first `level-N` class
fn heading_level<'a, N: HtmlNode<'a>>(node: &N, prefix: &str) -> ExtractResult<u8> {
    let class = node
        .class_list()
        .into_iter()
        .find(|class| class.starts_with(prefix))
        .ok_or_else(|| ExtractError::Structure("heading without a level class".to_string()))?;

    let digits: String = class[prefix.len()..].chars().take_while(char::is_ascii_digit).collect();
    match digits.parse::<u8>() {
        Ok(level) if level >= 1 => Ok(level),
        _ => Err(ExtractError::Structure(format!("unusable heading level class `{class}`"))),
    }
}

/// Walks the content container and emits paired blocks
pub struct ContentBlockExtractor<'c> {
    config: &'c ExtractConfig,
    normalizer: &'c CitationNormalizer<'c>,
    observer: &'c dyn ExtractionObserver,
}

impl<'c> ContentBlockExtractor<'c> {
    #[must_use]
    pub fn new(
        config: &'c ExtractConfig,
        normalizer: &'c CitationNormalizer<'c>,
        observer: &'c dyn ExtractionObserver,
    ) -> Self {
        Self { config, normalizer, observer }
    }

    /// Classify every direct child of `container` in source order
    pub fn extract<'a, N: HtmlNode<'a>>(&self, container: N) -> DualBlocks {
        let mut pairs = Vec::new();
        let children = container
            .element_children()
            .into_iter()
            .filter(|child| BLOCK_CONTAINER_TAGS.iter().any(|tag| child.tag_name().eq_ignore_ascii_case(tag)));

        for (index, child) in children.enumerate() {
            match self.extract_child(child) {
                Ok(blocks) => pairs.extend(blocks),
                Err(err) => self.observer.on_event(&ExtractionEvent::ChildSkipped {
                    index,
                    reason: err.to_string(),
                }),
            }
        }
        DualBlocks::from_pairs(pairs)
    }

    fn extract_child<'a, N: HtmlNode<'a>>(&self, child: N) -> ExtractResult<Vec<BlockPair>> {
        let blocks = self.config.blocks();
        let Some(signature) = ChildSignature::classify(&child, blocks) else {
            return Ok(Vec::new());
        };

        match signature {
            ChildSignature::Heading => {
                let level = heading_level(&child, &blocks.heading_level_prefix)?;
                let heading_tag = format!("h{}", u16::from(level) + 1);
                let source = child.descendants_by_tag(&heading_tag).into_iter().next().unwrap_or(child);
                let text = normalize_whitespace(&source.text_content());
                Ok(vec![(
                    ContentBlock::Heading { level, text: text.clone() },
                    ContentBlock::Heading { level, text },
                )])
            }
            ChildSignature::Paragraph => {
                let dual = self.normalizer.normalize_node(child);
                Ok(vec![(
                    ContentBlock::Paragraph { text: dual.clean },
                    ContentBlock::Paragraph { text: dual.annotated },
                )])
            }
            ChildSignature::OrderedList => {
                let items = self.list_items(child, |text| ContentBlock::OrderedItem { text });
                for (clean, _) in &items {
                    if let Some(text) = clean.text().filter(|text| split_ordered_numeral(text).is_none()) {
                        self.observer.on_event(&ExtractionEvent::UnnumberedOrderedItem { text: text.to_string() });
                    }
                }
                Ok(items)
            }
            ChildSignature::UnorderedList => {
                Ok(self.list_items(child, |text| ContentBlock::UnorderedItem { text }))
            }
            ChildSignature::Table => {
                let (clean, annotated) = extract_table(child, self.config, self.normalizer, self.observer);
                Ok(vec![(ContentBlock::Table(clean), ContentBlock::Table(annotated))])
            }
        }
    }

    fn list_items<'a, N: HtmlNode<'a>>(&self, list: N, make: impl Fn(String) -> ContentBlock) -> Vec<BlockPair> {
        list.descendants_by_tag("li")
            .into_iter()
            .map(|item| {
                let dual = self.normalizer.normalize_node(item);
                (make(dual.clean), make(dual.annotated))
            })
            .collect()
    }
}
