//! Narrow node capability used by every extractor.
//!
//! Extractors only need a tag name, attributes, ordered children and text.
//! `scraper::ElementRef` implements it here; another HTML tree can be
//! substituted by implementing the three required methods.

use scraper::{ElementRef, Node};
use std::ops::Deref;

/// A child of an element: either another element or a text run
#[derive(Debug, Clone, Copy)]
pub enum NodeChild<'a, N> {
    Element(N),
    Text(&'a str),
}

/// Read-only view of an HTML element
pub trait HtmlNode<'a>: Copy + Sized {
    /// Lowercase tag name
    fn tag_name(&self) -> &'a str;

    /// Attributes in source order
    fn attributes(&self) -> Vec<(&'a str, &'a str)>;

    /// Element and text children in source order
    fn child_nodes(&self) -> Vec<NodeChild<'a, Self>>;

    fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes()
            .into_iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    fn class_list(&self) -> Vec<&'a str> {
        self.attribute("class")
            .map(|classes| classes.split_whitespace().collect())
            .unwrap_or_default()
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(&class)
    }

    fn element_children(&self) -> Vec<Self> {
        self.child_nodes()
            .into_iter()
            .filter_map(|child| match child {
                NodeChild::Element(element) => Some(element),
                NodeChild::Text(_) => None,
            })
            .collect()
    }

    /// All descendant elements in document order, excluding `self`.
    ///
    /// Iterative so that pathologically deep markup cannot exhaust the stack.
    fn descendant_elements(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut stack: Vec<Self> = self.element_children().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.element_children().into_iter().rev());
        }
        out
    }

    /// First descendant (document order) satisfying the predicate
    fn find_descendant(&self, predicate: impl Fn(&Self) -> bool) -> Option<Self> {
        self.descendant_elements().into_iter().find(|node| predicate(node))
    }

    /// Every descendant with the given tag
    fn descendants_by_tag(&self, tag: &str) -> Vec<Self> {
        self.descendant_elements()
            .into_iter()
            .filter(|node| node.tag_name().eq_ignore_ascii_case(tag))
            .collect()
    }

    /// Concatenated text of all descendant text runs, verbatim
    fn text_content(&self) -> String {
        self.text_content_excluding(|_| false)
    }

    /// Concatenated text, skipping whole subtrees whose root matches `skip`
    fn text_content_excluding(&self, skip: impl Fn(&Self) -> bool) -> String {
        let mut out = String::new();
        let mut stack: Vec<NodeChild<'a, Self>> = self.child_nodes().into_iter().rev().collect();
        while let Some(child) = stack.pop() {
            match child {
                NodeChild::Text(text) => out.push_str(text),
                NodeChild::Element(element) => {
                    if !skip(&element) {
                        stack.extend(element.child_nodes().into_iter().rev());
                    }
                }
            }
        }
        out
    }
}

impl<'a> HtmlNode<'a> for ElementRef<'a> {
    fn tag_name(&self) -> &'a str {
        self.value().name()
    }

    fn attributes(&self) -> Vec<(&'a str, &'a str)> {
        self.value().attrs().collect()
    }

    fn child_nodes(&self) -> Vec<NodeChild<'a, Self>> {
        let mut out = Vec::new();
        for child in (**self).children() {
            match child.value() {
                Node::Text(text) => out.push(NodeChild::Text(text.deref())),
                Node::Element(_) => {
                    if let Some(element) = ElementRef::wrap(child) {
                        out.push(NodeChild::Element(element));
                    }
                }
                _ => {}
            }
        }
        out
    }
}
