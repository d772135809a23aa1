//! Table storage.
//!
//! The table is persisted as a single JSON document that is read in full and
//! rewritten in full. [`JsonFileStore`] is the production backend and
//! [`MockTableStore`] keeps the document in memory for tests.
//!
//! Stores do not coordinate writers themselves. The HTTP layer holds a
//! process-wide write lock around each load-modify-save cycle (see
//! [`crate::AppState`]); separate processes sharing one file still race and
//! the last writer wins.

mod json_file;
mod mock;
mod traits;
mod types;

pub use json_file::JsonFileStore;
pub use mock::MockTableStore;
pub use traits::TableStore;
pub use types::StoreError;
