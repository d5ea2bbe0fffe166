//! Fixed-width rendering of help-page tables.
//!
//! The help page uses tables for short command/description matrices. Each
//! table becomes a single [`Text`](FragmentKind::Text) fragment containing a
//! left-justified fixed-width block, with a dash separator row under the
//! header so the result stays readable in plain-text tooltips.

use doxy_commands_core::{Fragment, FragmentKind};
use tracing::debug;

use crate::dom::{DocTree, NodeId};
use crate::error::{ExtractError, Result};

const ROW_PREFIX: &str = "    ";
const COLUMN_SEPARATOR: &str = "  ";

/// Renders a table node into one `Text` fragment.
///
/// The table must contain exactly one `tbody` (newline separators aside),
/// at least one row, and the same cell count in every row; anything else
/// fails with [`ExtractError::MalformedTable`]. Row 0 is treated as the
/// header.
pub fn format_table(doc: &DocTree, table: NodeId) -> Result<Fragment> {
    let body = single_body(doc, table)?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for &row in doc.children(body) {
        if doc.is_bare_newline(row) {
            continue;
        }
        let cells = doc
            .children(row)
            .iter()
            .filter(|&&cell| !doc.is_bare_newline(cell))
            .map(|&cell| doc.text_content(cell).trim().to_string())
            .collect();
        rows.push(cells);
    }

    let Some(first) = rows.first() else {
        return Err(ExtractError::MalformedTable("table has no rows".into()));
    };

    let mut widths = vec![0usize; first.len()];
    for row in &rows {
        if row.len() != widths.len() {
            return Err(ExtractError::MalformedTable(format!(
                "row has {} columns, expected {}",
                row.len(),
                widths.len()
            )));
        }
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    // Row 0 is the header; separate it from the data rows.
    rows.insert(1, widths.iter().map(|&width| "-".repeat(width)).collect());
    debug!(rows = rows.len(), columns = widths.len(), "formatted table");

    let mut out = String::new();
    for row in &rows {
        out.push_str(ROW_PREFIX);
        for (index, (cell, &width)) in row.iter().zip(&widths).enumerate() {
            out.push_str(cell);
            let padding = width.saturating_sub(cell.chars().count());
            out.extend(std::iter::repeat_n(' ', padding));
            if index + 1 != row.len() {
                out.push_str(COLUMN_SEPARATOR);
            }
        }
        out.push('\n');
    }

    Ok(Fragment::new(FragmentKind::Text, out))
}

fn single_body(doc: &DocTree, table: NodeId) -> Result<NodeId> {
    let mut body = None;
    for &child in doc.children(table) {
        if doc.is_bare_newline(child) {
            continue;
        }
        if body.replace(child).is_some() {
            return Err(ExtractError::MalformedTable(
                "table contains more than one child tag".into(),
            ));
        }
    }
    match body {
        Some(body) if doc.tag(body) == Some("tbody") => Ok(body),
        Some(body) => Err(ExtractError::MalformedTable(format!(
            "expected tbody, found {}",
            doc.describe(body)
        ))),
        None => Err(ExtractError::MalformedTable("table has no body".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_table(rows: &[&[&str]]) -> (DocTree, NodeId) {
        let mut doc = DocTree::new();
        let root = doc.root();
        let table = doc.append_element(root, "table", Vec::new());
        doc.append_text(table, "\n");
        let body = doc.append_element(table, "tbody", Vec::new());
        for cells in rows {
            let row = doc.append_element(body, "tr", Vec::new());
            for cell in *cells {
                let td = doc.append_element(row, "td", Vec::new());
                doc.append_text(td, *cell);
            }
            doc.append_text(body, "\n");
        }
        (doc, table)
    }

    #[test]
    fn test_header_separator_and_alignment() {
        let (doc, table) = build_table(&[&["Cmd", "Desc"], &["\\a", "italic"]]);
        let fragment = format_table(&doc, table).unwrap();
        assert_eq!(fragment.kind, FragmentKind::Text);
        assert_eq!(
            fragment.content,
            "    Cmd  Desc  \n    ---  ------\n    \\a   italic\n"
        );
    }

    #[test]
    fn test_cell_text_is_trimmed() {
        let (doc, table) = build_table(&[&["  A  ", "B"], &["c", "  d "]]);
        let fragment = format_table(&doc, table).unwrap();
        assert_eq!(fragment.content, "    A  B\n    -  -\n    c  d\n");
    }

    #[test]
    fn test_mismatched_column_count_is_rejected() {
        let (doc, table) = build_table(&[&["A", "B"], &["only one"]]);
        let err = format_table(&doc, table).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedTable(_)));
    }

    #[test]
    fn test_missing_body_is_rejected() {
        let mut doc = DocTree::new();
        let root = doc.root();
        let table = doc.append_element(root, "table", Vec::new());
        doc.append_text(table, "\n");
        let err = format_table(&doc, table).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedTable(_)));
    }

    #[test]
    fn test_two_children_rejected() {
        let mut doc = DocTree::new();
        let root = doc.root();
        let table = doc.append_element(root, "table", Vec::new());
        doc.append_element(table, "thead", Vec::new());
        doc.append_element(table, "tbody", Vec::new());
        let err = format_table(&doc, table).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedTable(_)));
    }
}
