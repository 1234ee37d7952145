//! Table extraction with column-span expansion.
//!
//! The grid is built from nodes first and only then mapped to text, so the
//! same cell layout feeds both the clean and the annotated table.

use super::citation::CitationNormalizer;
use super::html_node::HtmlNode;
use super::schema::{DualText, TableData};
use crate::config::ExtractConfig;
use crate::extract_events::{ExtractionEvent, ExtractionObserver};

/// Cell layout of one table; `None` marks a filler produced by `colspan`
#[derive(Debug, Clone)]
pub struct TableGrid<N> {
    pub headers: Vec<Option<N>>,
    pub rows: Vec<Vec<Option<N>>>,
}

impl<N> Default for TableGrid<N> {
    fn default() -> Self {
        Self { headers: Vec::new(), rows: Vec::new() }
    }
}

impl<N> TableGrid<N> {
    /// Column count after padding
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).chain([self.headers.len()]).max().unwrap_or(0)
    }
}

fn is_header_cell<'a, N: HtmlNode<'a>>(node: &N) -> bool {
    node.tag_name().eq_ignore_ascii_case("th")
}

/// `th` and `td` children of a row, in document order
fn cells_of<'a, N: HtmlNode<'a>>(row: N) -> Vec<N> {
    row.element_children()
        .into_iter()
        .filter(|cell| is_header_cell(cell) || cell.tag_name().eq_ignore_ascii_case("td"))
        .collect()
}

/// Expand `colspan` into trailing fillers. Malformed spans are reported and
/// the cell is kept unexpanded; the row is capped at `max_columns`.
fn expand_spans<'a, N: HtmlNode<'a>>(
    cells: Vec<N>,
    max_columns: usize,
    observer: &dyn ExtractionObserver,
) -> Vec<Option<N>> {
    let mut out = Vec::with_capacity(cells.len());
    for cell in cells {
        out.push(Some(cell));
        let Some(raw) = cell.attribute("colspan") else {
            continue;
        };
        match raw.trim().parse::<usize>() {
            Ok(span) if span > 1 => {
                let fillers = (span - 1).min(max_columns);
                out.extend(std::iter::repeat_n(None, fillers));
            }
            Ok(_) => {}
            Err(_) => observer.on_event(&ExtractionEvent::MalformedSpan {
                context: "colspan".to_string(),
                token: raw.to_string(),
            }),
        }
    }
    out.truncate(max_columns);
    out
}

/// Locate header and data cells of a table-like element.
///
/// The header is the first row made up entirely of `th` cells. A table with
/// no `th` at all promotes its first row instead; a table whose `th` cells
/// only label rows gets no header, and those labels stay in column 0 of
/// their row. Rows without cells are skipped. Every row is padded to the
/// widest row or header, and no row is ever wider than that width.
pub fn extract_grid<'a, N: HtmlNode<'a>>(
    table: N,
    config: &ExtractConfig,
    observer: &dyn ExtractionObserver,
) -> TableGrid<N> {
    let max_columns = config.max_table_columns();
    let rows: Vec<Vec<N>> = table.descendants_by_tag("tr").into_iter().map(cells_of).collect();

    let header_index = rows
        .iter()
        .position(|cells| !cells.is_empty() && cells.iter().all(is_header_cell))
        .or_else(|| {
            let has_th = rows.iter().flatten().any(is_header_cell);
            (!has_th && rows.first().is_some_and(|cells| !cells.is_empty())).then_some(0)
        });
    let header_cells = header_index.map(|index| rows[index].clone()).unwrap_or_default();

    let mut grid = TableGrid {
        headers: expand_spans(header_cells, max_columns, observer),
        rows: Vec::new(),
    };

    for (index, cells) in rows.into_iter().enumerate() {
        if Some(index) == header_index {
            continue;
        }
        if cells.is_empty() {
            continue;
        }
        if grid.rows.len() >= config.max_table_rows() {
            break;
        }
        grid.rows.push(expand_spans(cells, max_columns, observer));
    }

    let width = grid.width();
    for row in &mut grid.rows {
        row.resize(width, None);
    }
    if !grid.headers.is_empty() {
        grid.headers.resize(width, None);
    }
    grid
}

/// Extract a table as its clean and annotated variants
pub fn extract_table<'a, N: HtmlNode<'a>>(
    table: N,
    config: &ExtractConfig,
    normalizer: &CitationNormalizer<'_>,
    observer: &dyn ExtractionObserver,
) -> (TableData, TableData) {
    let grid = extract_grid(table, config, observer);

    let cell = |node: &Option<N>| node.map(|n| normalizer.normalize_node(n)).unwrap_or_default();
    let split = |cells: &[Option<N>]| -> (Vec<String>, Vec<String>) {
        cells.iter().map(|node| cell(node)).map(|DualText { clean, annotated }| (clean, annotated)).unzip()
    };

    let (clean_headers, annotated_headers) = split(&grid.headers);
    let mut clean = TableData { headers: clean_headers, rows: Vec::with_capacity(grid.rows.len()) };
    let mut annotated =
        TableData { headers: annotated_headers, rows: Vec::with_capacity(grid.rows.len()) };
    for row in &grid.rows {
        let (c, a) = split(row);
        clean.rows.push(c);
        annotated.rows.push(a);
    }

    observer.on_event(&ExtractionEvent::TableExtracted {
        columns: grid.width(),
        rows: grid.rows.len(),
    });
    (clean, annotated)
}
