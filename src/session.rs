//! Console session state shared by the form and the table.
//!
//! Owns the employee selected for editing and the refresh generation. A successful
//! save discards the whole table state and bumps the generation; list responses
//! requested under an older generation are dropped when they arrive.

use crate::error::Result;
use crate::form::{RecordForm, SubmitRequest};
use crate::models::{Employee, EmployeeId};
use crate::table::RecordTable;

/// Row waiting for delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub id: EmployeeId,
    pub name: String,
}

/// Follow-up after a delete call returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Generation the list reload must be tagged with.
    pub reload_generation: u64,
    /// Message for the error dialog when the delete failed.
    pub error: Option<String>,
}

/// What happened to a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Base collection replaced with this many rows.
    Applied(usize),
    /// Fetch failed; the table is now empty.
    Failed,
    /// Response belonged to a discarded table and was ignored.
    Stale,
}

#[derive(Debug, Default)]
pub struct Session {
    pub form: RecordForm,
    pub table: RecordTable,
    selected: Option<Employee>,
    generation: u64,
    pending_delete: Option<DeleteTarget>,
    scroll_to_top: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Employee currently loaded in the form, if any.
    pub fn selected(&self) -> Option<&Employee> {
        self.selected.as_ref()
    }

    /// Current table generation; tag list requests with it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Edit action from a table row. Ignored while a save is in flight.
    pub fn edit(&mut self, employee: Employee) -> bool {
        if self.form.is_pending() {
            return false;
        }
        self.form.load(Some(&employee));
        self.selected = Some(employee);
        self.scroll_to_top = true;
        true
    }

    /// Leave edit mode without saving. Ignored while a save is in flight.
    pub fn cancel_edit(&mut self) {
        if self.form.is_pending() {
            return;
        }
        self.selected = None;
        self.form.load(None);
    }

    /// Validate the form and produce the create/update request.
    pub fn submit(&mut self) -> Result<SubmitRequest> {
        self.form.submit()
    }

    /// Create/update succeeded: clear selection, discard table state, and return the
    /// generation the reload must be tagged with.
    pub fn on_saved(&mut self) -> u64 {
        self.selected = None;
        self.form.on_success();
        self.table = RecordTable::new();
        self.generation += 1;
        self.generation
    }

    /// Create/update failed; the draft stays as typed.
    pub fn on_save_failed(&mut self) {
        self.form.on_failure();
    }

    /// Apply a list response tagged with the generation it was requested under.
    pub fn apply_employees<E>(&mut self, generation: u64, result: std::result::Result<Vec<Employee>, E>) -> LoadOutcome {
        if generation != self.generation {
            return LoadOutcome::Stale;
        }
        match result {
            Ok(employees) => {
                let count = employees.len();
                self.table.set_employees(employees);
                LoadOutcome::Applied(count)
            }
            Err(_) => {
                self.table.clear();
                LoadOutcome::Failed
            }
        }
    }

    /// Ask for confirmation before deleting a row.
    pub fn request_delete(&mut self, id: EmployeeId, name: impl Into<String>) {
        self.pending_delete = Some(DeleteTarget { id, name: name.into() });
    }

    pub fn pending_delete(&self) -> Option<&DeleteTarget> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Confirmation accepted: hand back the target to delete.
    pub fn confirm_delete(&mut self) -> Option<DeleteTarget> {
        self.pending_delete.take()
    }

    /// A delete call returned. The list is reloaded whatever the outcome.
    pub fn on_delete_finished<E: std::fmt::Display>(&self, result: std::result::Result<(), E>) -> DeleteOutcome {
        DeleteOutcome {
            reload_generation: self.generation,
            error: result.err().map(|e| format!("Delete failed: {e}")),
        }
    }

    /// One-shot flag set by `edit` so the view jumps back to the form.
    pub fn take_scroll_to_top(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_top)
    }
}
