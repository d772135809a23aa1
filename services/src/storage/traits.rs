//! Storage trait definitions.

use super::types::StoreError;
use checktable_model::Table;
use std::future::Future;

/// Whole-document table storage.
///
/// There is no partial update: callers load the full table, change it and
/// save it back. See [module documentation](super) for how writers are
/// serialized.
pub trait TableStore: Clone + Send + Sync + 'static {
    fn load(&self) -> impl Future<Output = Result<Table, StoreError>> + Send;

    fn save(&self, table: &Table) -> impl Future<Output = Result<(), StoreError>> + Send;
}
