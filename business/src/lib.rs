//! Client core of the check table page.
//!
//! Everything here is independent of the DOM: the HTTP API client, the
//! session cache, the per-cell toggle state machine and the rendered view.
//! The `checktable-ui` crate mounts it in the browser.

pub mod api;
pub mod cell;
pub mod config;
pub mod date;
pub mod http;
pub mod render;
pub mod session;
pub mod status;

pub use api::{ApiError, ApiResult, UpdateCellResponse, fetch_table, update_cell};
pub use cell::{CellPhase, CheckboxCell, PendingToggle, ToggleError};
pub use config::ClientConfig;
pub use date::{format_check_date, today};
pub use render::{CellView, RowView, TableView};
pub use session::{Settlement, TableSession};
pub use status::{Status, StatusKind};
