//! Markdown rendering of an extracted [`Document`].
//!
//! Section order is fixed: title, short description, abstract, information,
//! table of contents, content, references. Sections without data are left
//! out entirely.

use serde::{Deserialize, Serialize};

use crate::config::RenderOptions;
use crate::page_extractor::schema::{ContentBlock, Document, Reference, TableData, Variant};
use crate::utils::{MAX_TOC_LEVEL, split_ordered_numeral};

/// Both Markdown variants of one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMarkdown {
    pub clean: String,
    #[serde(rename = "with_citations")]
    pub annotated: String,
}

/// Render the clean and annotated Markdown in one call
#[must_use]
pub fn render_both(doc: &Document, options: &RenderOptions) -> RenderedMarkdown {
    RenderedMarkdown {
        clean: render_markdown(doc, Variant::Clean, options),
        annotated: render_markdown(doc, Variant::Annotated, options),
    }
}

/// Render one variant of a document as Markdown
#[must_use]
pub fn render_markdown(doc: &Document, variant: Variant, options: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", doc.title));

    if !doc.short_description.is_empty() {
        out.push_str(&format!("{}\n\n", doc.short_description));
    }

    if !doc.abstract_text.is_empty() {
        out.push_str("## Abstract\n\n");
        out.push_str(&format!("{}\n\n", doc.abstract_text.get(variant)));
    }

    if !doc.info_box.is_empty() {
        out.push_str("## Information\n\n");
        for (name, value) in doc.info_box.iter() {
            out.push_str(&format!("**{name}**: {}\n", value.get(variant)));
        }
        out.push('\n');
    }

    if !doc.toc.is_empty() {
        out.push_str("## Table of Contents\n\n");
        for entry in &doc.toc {
            let depth = entry.level.min(MAX_TOC_LEVEL).saturating_sub(1);
            let indent = "  ".repeat(depth as usize);
            out.push_str(&format!("{indent}- {}\n", entry.text));
        }
        out.push('\n');
    }

    let blocks = doc.content.get(variant);
    if !blocks.is_empty() {
        out.push_str("## Content\n\n");
        for block in blocks {
            render_block(&mut out, block, options);
        }
    }

    if !doc.references.is_empty() {
        out.push_str("## References\n\n");
        for reference in &doc.references {
            out.push_str(&render_reference(reference, options));
            out.push('\n');
        }
    }

    out
}

fn render_block(out: &mut String, block: &ContentBlock, options: &RenderOptions) {
    match block {
        ContentBlock::Heading { level, text } => {
            out.push_str(&format!("{} {text}\n\n", "#".repeat(usize::from(*level))));
        }
        ContentBlock::Paragraph { text } => out.push_str(&format!("{text}\n\n")),
        ContentBlock::OrderedItem { text } => match split_ordered_numeral(text) {
            Some((number, rest)) => out.push_str(&format!("{number}. {rest}\n\n")),
            None if options.drop_unnumbered_ordered_items => {}
            None => out.push_str(&format!("{text}\n\n")),
        },
        ContentBlock::UnorderedItem { text } => out.push_str(&format!("- {text}\n\n")),
        ContentBlock::Table(table) if table.is_empty() => {
            out.push_str(&format!("{}\n\n", options.empty_table_marker));
        }
        ContentBlock::Table(table) => {
            if let Some(label) = &options.table_label {
                out.push_str(&format!("{label}\n\n"));
            }
            out.push_str(&render_table(table, options));
            out.push('\n');
        }
    }
}

fn pipe_row<S: AsRef<str>>(cells: &[S], width: usize) -> String {
    let cells: Vec<&str> = (0..width).map(|i| cells.get(i).map_or("", |cell| cell.as_ref())).collect();
    format!("| {} |\n", cells.join(" | "))
}

/// Pipe table; every data row is padded or truncated to the header width.
///
/// Header-less tables get an empty header row sized to the first data row.
#[must_use]
pub fn render_table(table: &TableData, options: &RenderOptions) -> String {
    let width = if table.headers.is_empty() {
        table.rows.first().map_or(0, Vec::len)
    } else {
        table.headers.len()
    };
    if width == 0 {
        return format!("{}\n\n", options.empty_table_marker);
    }

    let mut out = pipe_row(&table.headers, width);
    out.push_str(&pipe_row(&vec!["---"; width], width));
    for row in &table.rows {
        out.push_str(&pipe_row(row, width));
    }
    out
}

fn render_reference(reference: &Reference, options: &RenderOptions) -> String {
    let date = if reference.ref_date.is_empty() {
        String::new()
    } else {
        format!(" ({}：{})", options.citation_date_label, reference.ref_date)
    };

    if reference.url.is_empty() {
        format!("{}. {}{date}", reference.id, reference.title)
    } else {
        format!("{}. [{}]({}){date}", reference.id, reference.title, reference.url)
    }
}
