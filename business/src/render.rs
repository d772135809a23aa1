//! DOM-independent view of the table and its HTML markup.

use crate::cell::CheckboxCell;
use checktable_model::{ColumnType, Row, Table};
use std::fmt::Write as _;

/// Key of the text column that names a row.
pub const NAME_COLUMN: &str = "name";
/// Shown in an empty text cell other than the name.
pub const EMPTY_PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellView {
    Text {
        column_key: String,
        text: String,
        /// Rendered with the `is-empty` marker.
        empty: bool,
    },
    Checkbox(CheckboxCell),
    /// Column of a type this client does not know.
    Raw {
        column_key: String,
        column_type: String,
        text: String,
    },
}

impl CellView {
    fn from_cell(row: &Row, column_key: &str, label: &str, column_type: &ColumnType) -> Self {
        let value = row.cell(column_key);
        match column_type {
            ColumnType::Text => {
                let empty = value.is_empty() && column_key != NAME_COLUMN;
                CellView::Text {
                    column_key: column_key.to_owned(),
                    text: if empty {
                        EMPTY_PLACEHOLDER.to_owned()
                    } else {
                        value.to_owned()
                    },
                    empty,
                }
            }
            ColumnType::Checkbox => CellView::Checkbox(CheckboxCell::new(
                &row.id,
                column_key,
                format!("{}: {label}", row.cell(NAME_COLUMN)),
                value,
            )),
            ColumnType::Other(other) => CellView::Raw {
                column_key: column_key.to_owned(),
                column_type: other.clone(),
                text: value.to_owned(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<RowView>,
}

impl TableView {
    pub fn from_table(table: &Table) -> Self {
        let headers = table.columns.iter().map(|c| c.label.clone()).collect();
        let rows = table
            .rows
            .iter()
            .map(|row| RowView {
                id: row.id.clone(),
                cells: table
                    .columns
                    .iter()
                    .map(|c| CellView::from_cell(row, &c.key, &c.label, &c.column_type))
                    .collect(),
            })
            .collect();

        Self { headers, rows }
    }

    pub fn checkbox(&self, row_id: &str, column_key: &str) -> Option<&CheckboxCell> {
        self.rows
            .iter()
            .filter(|row| row.id == row_id)
            .flat_map(|row| &row.cells)
            .find_map(|cell| match cell {
                CellView::Checkbox(cell) if cell.column_key == column_key => Some(cell),
                _ => None,
            })
    }

    pub fn checkboxes(&self) -> impl Iterator<Item = &CheckboxCell> {
        self.rows
            .iter()
            .flat_map(|row| &row.cells)
            .filter_map(|cell| match cell {
                CellView::Checkbox(cell) => Some(cell),
                _ => None,
            })
    }

    pub fn checkbox_mut(&mut self, row_id: &str, column_key: &str) -> Option<&mut CheckboxCell> {
        self.rows
            .iter_mut()
            .filter(|row| row.id == row_id)
            .flat_map(|row| &mut row.cells)
            .find_map(|cell| match cell {
                CellView::Checkbox(cell) if cell.column_key == column_key => Some(cell),
                _ => None,
            })
    }

    /// Markup for the inside of `<thead>`.
    pub fn head_html(&self) -> String {
        let mut html = String::from("<tr>");
        for header in &self.headers {
            let _ = write!(html, "<th>{}</th>", escape(header));
        }
        html.push_str("</tr>");
        html
    }

    /// Markup for the inside of `<tbody>`.
    pub fn body_html(&self) -> String {
        let mut html = String::new();
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in &row.cells {
                write_cell(&mut html, cell);
            }
            html.push_str("</tr>");
        }
        html
    }
}

fn write_cell(html: &mut String, cell: &CellView) {
    // writing into a String cannot fail
    let _ = match cell {
        CellView::Text {
            column_key,
            text,
            empty,
        } => write!(
            html,
            r#"<td data-type="text" data-key="{}"{}>{}</td>"#,
            escape(column_key),
            if *empty { r#" class="is-empty""# } else { "" },
            escape(text)
        ),
        CellView::Checkbox(cell) => write!(
            html,
            concat!(
                r#"<td data-type="checkbox" data-key="{key}"><div class="checkbox-cell">"#,
                r#"<input type="checkbox" data-row-id="{row}" data-column-key="{key}" aria-label="{aria}"{checked}{disabled}>"#,
                r#"<span class="task-table__date">{label}</span></div></td>"#
            ),
            key = escape(&cell.column_key),
            row = escape(&cell.row_id),
            aria = escape(&cell.aria_label),
            checked = if cell.checked { " checked" } else { "" },
            disabled = if cell.disabled { " disabled" } else { "" },
            label = escape(&cell.label),
        ),
        CellView::Raw {
            column_key,
            column_type,
            text,
        } => write!(
            html,
            r#"<td data-type="{}" data-key="{}">{}</td>"#,
            escape(column_type),
            escape(column_key),
            escape(text)
        ),
    };
}

/// Escapes text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
