//! Session state of the table page.
//!
//! The session owns the cached copy of the table, the rendered view and the
//! status line. The cache is never authoritative: it is replaced by every load
//! and patched from every successful update response.
//!
//! Network calls are not made here. Each operation is split into a `begin_*`
//! step, run before the request, and a `finish_*` step that takes the
//! request's result. The browser glue awaits the request in between without
//! holding a borrow of the session.

use crate::api::{ApiResult, UpdateCellResponse};
use crate::cell::{CheckboxCell, PendingToggle, ToggleError};
use crate::config::ClientConfig;
use crate::render::TableView;
use crate::status::{REFRESHED, SAVED, Status};
use checktable_model::Table;
use chrono::NaiveDate;

/// How a toggle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Reconciled,
    RolledBack,
}

#[derive(Debug, Default)]
pub struct TableSession {
    config: ClientConfig,
    table: Option<Table>,
    view: TableView,
    status: Status,
    loading: bool,
    last_token: u64,
}

impl TableSession {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn view(&self) -> &TableView {
        &self.view
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// True while a load is in flight: the loading indicator is shown and the
    /// refresh button disabled.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn cell(&self, row_id: &str, column_key: &str) -> Option<&CheckboxCell> {
        self.view.checkbox(row_id, column_key)
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Applies the result of `GET /api/data`.
    ///
    /// Returns true when the view was replaced and needs to be redrawn.
    pub fn finish_load(&mut self, result: ApiResult<Table>, announce: bool) -> bool {
        self.loading = false;
        match result {
            Ok(table) => {
                log::info!(
                    "Loaded table with {} columns and {} rows",
                    table.columns.len(),
                    table.rows.len()
                );
                let mut view = TableView::from_table(&table);
                self.carry_in_flight(&mut view);
                self.view = view;
                self.table = Some(table);
                self.status = if announce {
                    Status::success(REFRESHED)
                } else {
                    Status::cleared()
                };
                true
            }
            Err(e) => {
                log::warn!("Loading table failed: {e}");
                self.status = Status::error(e.to_string());
                false
            }
        }
    }

    /// Starts a user toggle of a checkbox cell to `now_checked`.
    pub fn begin_toggle(
        &mut self,
        row_id: &str,
        column_key: &str,
        now_checked: bool,
        today: NaiveDate,
    ) -> Result<PendingToggle, ToggleError> {
        let cell = self
            .view
            .checkbox_mut(row_id, column_key)
            .ok_or_else(|| ToggleError::UnknownCell {
                row_id: row_id.to_owned(),
                column_key: column_key.to_owned(),
            })?;
        self.last_token += 1;
        cell.begin(now_checked, today, self.last_token)
    }

    /// Applies the result of the update request started by [`Self::begin_toggle`].
    ///
    /// The cell is re-enabled in every case. A reload while the request was in
    /// flight carries the pending cell over, so the result still lands on it.
    /// A cell that is not waiting on this toggle is never touched.
    pub fn finish_toggle(
        &mut self,
        pending: &PendingToggle,
        result: ApiResult<UpdateCellResponse>,
    ) -> Settlement {
        let settlement = match result {
            Ok(response) => {
                let persisted = response
                    .row
                    .as_ref()
                    .map(|row| row.cell(&pending.column_key).to_owned());
                if let Some(value) = &persisted {
                    self.merge_persisted(pending, value);
                }
                if let Some(cell) = self.pending_cell(pending) {
                    cell.reconcile(pending, persisted.as_deref());
                }
                self.status = Status::success(SAVED);
                Settlement::Reconciled
            }
            Err(e) => {
                log::warn!(
                    "Rolling back {}/{}: {e}",
                    pending.row_id,
                    pending.column_key
                );
                if let Some(cell) = self.pending_cell(pending) {
                    cell.roll_back(pending);
                }
                self.status = Status::error(e.to_string());
                Settlement::RolledBack
            }
        };

        if let Some(cell) = self.pending_cell(pending) {
            cell.finish();
        }
        settlement
    }

    fn pending_cell(&mut self, pending: &PendingToggle) -> Option<&mut CheckboxCell> {
        self.view
            .checkbox_mut(&pending.row_id, &pending.column_key)
            .filter(|cell| cell.awaits(pending))
    }

    /// Keeps cells with a toggle in flight pending in a freshly loaded view.
    fn carry_in_flight(&self, view: &mut TableView) {
        for cell in self.view.checkboxes().filter(|cell| cell.in_flight.is_some()) {
            if let Some(fresh) = view.checkbox_mut(&cell.row_id, &cell.column_key) {
                *fresh = CheckboxCell {
                    aria_label: std::mem::take(&mut fresh.aria_label),
                    ..cell.clone()
                };
            }
        }
    }

    fn merge_persisted(&mut self, pending: &PendingToggle, value: &str) {
        if let Some(row) = self
            .table
            .as_mut()
            .and_then(|table| table.row_mut(&pending.row_id))
        {
            row.set_cell(pending.column_key.clone(), value);
        }
    }
}
