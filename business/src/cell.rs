//! Per-cell state machine of the checkbox interaction.
//!
//! ```text
//! Idle --begin--> Pending --reconcile--> Reconciled --finish--> Idle
//!                         \--roll_back--> RolledBack --finish--/
//! ```
//!
//! While a cell is `Pending` its input is disabled and a second toggle is
//! refused. Settling applies to the values captured when the toggle began,
//! whatever happened to the cell in between.

use crate::date::format_check_date;
use checktable_model::is_checked;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellPhase {
    #[default]
    Idle,
    Pending,
    Reconciled,
    RolledBack,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleError {
    #[error("An update for {row_id}/{column_key} is already in flight")]
    InFlight { row_id: String, column_key: String },

    #[error("No checkbox cell {row_id}/{column_key}")]
    UnknownCell { row_id: String, column_key: String },
}

/// Everything captured when a toggle starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToggle {
    pub row_id: String,
    pub column_key: String,
    pub previous_value: String,
    pub previous_checked: bool,
    pub desired_value: String,
    /// Identifies this toggle; only the cell it was begun on accepts its result.
    pub token: u64,
}

impl PendingToggle {
    pub fn desired_checked(&self) -> bool {
        is_checked(&self.desired_value)
    }
}

/// View state of one checkbox cell: the input plus its date label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxCell {
    pub row_id: String,
    pub column_key: String,
    pub aria_label: String,
    /// Text of the date label next to the input.
    pub label: String,
    pub checked: bool,
    pub disabled: bool,
    pub phase: CellPhase,
    /// Token of the toggle awaiting its update response.
    pub in_flight: Option<u64>,
}

impl CheckboxCell {
    pub fn new(
        row_id: impl Into<String>,
        column_key: impl Into<String>,
        aria_label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let label = value.into();
        Self {
            row_id: row_id.into(),
            column_key: column_key.into(),
            aria_label: aria_label.into(),
            checked: is_checked(&label),
            label,
            disabled: false,
            phase: CellPhase::Idle,
            in_flight: None,
        }
    }

    /// Applies the optimistic state for a user toggle to `now_checked`.
    ///
    /// The previous state is read from the label, so it is whatever the user
    /// was looking at when they clicked.
    pub fn begin(
        &mut self,
        now_checked: bool,
        today: NaiveDate,
        token: u64,
    ) -> Result<PendingToggle, ToggleError> {
        if self.phase == CellPhase::Pending {
            return Err(ToggleError::InFlight {
                row_id: self.row_id.clone(),
                column_key: self.column_key.clone(),
            });
        }

        let desired_value = if now_checked {
            format_check_date(today)
        } else {
            String::new()
        };
        let pending = PendingToggle {
            row_id: self.row_id.clone(),
            column_key: self.column_key.clone(),
            previous_value: self.label.clone(),
            previous_checked: is_checked(&self.label),
            desired_value,
            token,
        };

        self.label = pending.desired_value.clone();
        self.checked = now_checked;
        self.disabled = true;
        self.phase = CellPhase::Pending;
        self.in_flight = Some(token);
        Ok(pending)
    }

    /// True when `pending` is the toggle this cell is waiting on.
    pub fn awaits(&self, pending: &PendingToggle) -> bool {
        self.in_flight == Some(pending.token)
    }

    /// The service accepted the update. `persisted` is the value it reports, if any.
    pub fn reconcile(&mut self, pending: &PendingToggle, persisted: Option<&str>) {
        self.label = persisted.unwrap_or(&pending.desired_value).to_owned();
        self.checked = is_checked(&self.label);
        self.phase = CellPhase::Reconciled;
    }

    /// The update failed; show exactly what was there before.
    pub fn roll_back(&mut self, pending: &PendingToggle) {
        self.label = pending.previous_value.clone();
        self.checked = pending.previous_checked;
        self.phase = CellPhase::RolledBack;
    }

    /// Re-enables the input once the request has settled either way.
    pub fn finish(&mut self) {
        self.disabled = false;
        self.phase = CellPhase::Idle;
        self.in_flight = None;
    }
}
