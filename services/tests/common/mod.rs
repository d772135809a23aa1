//! Shared test utilities for integration tests.
//!
//! This module provides common test infrastructure including:
//! - `sample_table` - a small table with text and checkbox columns
//! - `FileFixture` - a temporary data file and public directory wired into a router

use checktable_model::{Column, Row, Table};
use checktable_services::{config::Config, routes, storage::JsonFileStore};
use tempfile::TempDir;

/// Two text columns, two checkbox columns and three rows.
pub fn sample_table() -> Table {
    Table::new(
        vec![
            Column::text("name", "Name"),
            Column::text("comment", "Comment"),
            Column::checkbox("reviewed", "Reviewed"),
            Column::checkbox("shipped", "Shipped"),
        ],
        vec![
            Row::new("r1")
                .with_cell("name", "Alpha")
                .with_cell("comment", "")
                .with_cell("reviewed", "")
                .with_cell("shipped", ""),
            Row::new("r2")
                .with_cell("name", "Beta")
                .with_cell("comment", "needs docs")
                .with_cell("reviewed", "02.03.25")
                .with_cell("shipped", ""),
            Row::new("r3")
                .with_cell("name", "Гамма \"γ\"")
                .with_cell("comment", "tab\tand\nnewline")
                .with_cell("reviewed", "")
                .with_cell("shipped", "11.11.24"),
        ],
    )
}

/// A temporary on-disk deployment: `data/tableData.json` plus a `public/` directory.
pub struct FileFixture {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl FileFixture {
    pub fn new(table: &Table) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join("data")).expect("create data dir");
        std::fs::create_dir_all(dir.path().join("public")).expect("create public dir");
        let fixture = Self { dir };
        fixture.write_table(table);
        fixture
    }

    pub fn data_path(&self) -> std::path::PathBuf {
        self.dir.path().join("data").join("tableData.json")
    }

    pub fn public_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("public")
    }

    pub fn write_table(&self, table: &Table) {
        let json = serde_json::to_string_pretty(table).expect("serialize table");
        std::fs::write(self.data_path(), json).expect("write table");
    }

    pub fn write_raw(&self, content: &str) {
        std::fs::write(self.data_path(), content).expect("write raw table");
    }

    pub fn raw(&self) -> String {
        std::fs::read_to_string(self.data_path()).expect("read table file")
    }

    pub fn add_public_file(&self, relative: &str, content: &str) {
        let path = self.public_dir().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create asset dir");
        }
        std::fs::write(path, content).expect("write asset");
    }

    pub fn app(&self) -> axum::Router {
        let config = Config::new_for_test_with_public_dir(self.public_dir());
        routes(JsonFileStore::new(self.data_path()), config)
    }
}
