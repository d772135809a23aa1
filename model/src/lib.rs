//! Shared table model for checktable.
//!
//! This crate contains the data types that travel between the service and the
//! client, including the JSON document persisted on disk. Both `services` and
//! `business` depend on it so the wire format is defined in one place.

pub mod table;

pub use table::{Column, ColumnType, Row, Table, TableError, is_checked};
