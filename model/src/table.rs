//! Table, column and row types.
//!
//! The JSON shape is the persisted document:
//!
//! ```json
//! {
//!   "columns": [{ "key": "done", "label": "Done", "type": "checkbox" }],
//!   "rows": [{ "id": "1", "done": "" }]
//! }
//! ```
//!
//! Checkbox cells hold a string, never a boolean: `""` means unchecked and any
//! other value is the date the box was checked.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Returns whether a checkbox cell value represents a checked box.
pub fn is_checked(value: &str) -> bool {
    !value.is_empty()
}

/// Cell type of a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Checkbox,
    /// A type this build does not know. Kept verbatim so the document survives a rewrite.
    #[serde(untagged)]
    Other(String),
}

impl ColumnType {
    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Checkbox => "checkbox",
            ColumnType::Other(other) => other,
        }
    }
}

/// Schema entry for one column. Order in [`Table::columns`] is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            column_type,
        }
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ColumnType::Text)
    }

    pub fn checkbox(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ColumnType::Checkbox)
    }

    pub fn is_checkbox(&self) -> bool {
        self.column_type == ColumnType::Checkbox
    }
}

/// One record. Serialized flat: `id` sits next to the cell values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    #[serde(flatten)]
    pub cells: IndexMap<String, String>,
}

impl Row {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cells: IndexMap::new(),
        }
    }

    pub fn with_cell(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.cells.insert(key.into(), value.into());
        self
    }

    /// Value of a cell. Missing cells read as empty.
    pub fn cell(&self, key: &str) -> &str {
        if key == "id" {
            return &self.id;
        }
        self.cells.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set_cell(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(key.into(), value.into());
    }
}

/// The whole persisted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

/// Errors raised by table lookups and mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Row not found: {0}")]
    RowNotFound(String),

    #[error("Column {0} cannot be updated through this endpoint")]
    NotCheckbox(String),

    #[error("Duplicate column key: {0}")]
    DuplicateColumnKey(String),

    #[error("Duplicate row id: {0}")]
    DuplicateRowId(String),
}

impl Table {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.key == key)
    }

    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn row_mut(&mut self, id: &str) -> Option<&mut Row> {
        self.rows.iter_mut().find(|row| row.id == id)
    }

    /// Checks key and id uniqueness, returning the first violation found.
    pub fn validate(&self) -> Result<(), TableError> {
        let mut keys = HashSet::new();
        for column in &self.columns {
            if !keys.insert(column.key.as_str()) {
                return Err(TableError::DuplicateColumnKey(column.key.clone()));
            }
        }

        let mut ids = HashSet::new();
        for row in &self.rows {
            if !ids.insert(row.id.as_str()) {
                return Err(TableError::DuplicateRowId(row.id.clone()));
            }
        }

        Ok(())
    }

    /// Sets a checkbox cell and returns the updated row.
    ///
    /// Lookups run in order column, column type, row. The table is untouched
    /// when any of them fails. The value itself is not inspected.
    pub fn set_checkbox_cell(
        &mut self,
        row_id: &str,
        column_key: &str,
        value: impl Into<String>,
    ) -> Result<&Row, TableError> {
        let column = self
            .column(column_key)
            .ok_or_else(|| TableError::ColumnNotFound(column_key.to_owned()))?;
        if !column.is_checkbox() {
            return Err(TableError::NotCheckbox(column_key.to_owned()));
        }

        let row = self
            .row_mut(row_id)
            .ok_or_else(|| TableError::RowNotFound(row_id.to_owned()))?;
        row.set_cell(column_key, value);
        Ok(row)
    }
}
