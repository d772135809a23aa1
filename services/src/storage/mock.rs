//! Mock table storage for testing.

use super::traits::TableStore;
use super::types::StoreError;
use checktable_model::Table;

/// In-memory mock implementation of `TableStore` for testing.
///
/// Counts saves so tests can assert that a rejected request left storage untouched.
#[derive(Clone, Default)]
pub struct MockTableStore {
    inner: std::sync::Arc<std::sync::RwLock<MockState>>,
}

#[derive(Default)]
struct MockState {
    table: Option<Table>,
    saves: usize,
    fail_saves: bool,
}

impl MockTableStore {
    /// A store with no document; every load fails.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: Table) -> Self {
        let store = Self::default();
        store.inner.write().expect("lock poisoned").table = Some(table);
        store
    }

    /// Makes every subsequent save fail.
    pub fn failing_saves(self) -> Self {
        self.inner.write().expect("lock poisoned").fail_saves = true;
        self
    }

    pub fn saves(&self) -> usize {
        self.inner.read().expect("lock poisoned").saves
    }

    pub fn snapshot(&self) -> Option<Table> {
        self.inner.read().expect("lock poisoned").table.clone()
    }
}

impl TableStore for MockTableStore {
    async fn load(&self) -> Result<Table, StoreError> {
        self.inner
            .read()
            .expect("lock poisoned")
            .table
            .clone()
            .ok_or_else(|| StoreError::Unavailable("no table document".to_owned()))
    }

    async fn save(&self, table: &Table) -> Result<(), StoreError> {
        let mut state = self.inner.write().expect("lock poisoned");
        if state.fail_saves {
            return Err(StoreError::Unavailable("disk full".to_owned()));
        }
        state.table = Some(table.clone());
        state.saves += 1;
        Ok(())
    }
}
