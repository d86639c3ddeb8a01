//! Employee form: draft editing and create-or-update submission.

use crate::error::{AppError, Result};
use crate::models::{Employee, EmployeeDraft, EmployeeId, State};

/// What a valid submit asks the service to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    Create { draft: EmployeeDraft },
    Update { id: EmployeeId, draft: EmployeeDraft },
}

/// Form state for employee create/edit.
#[derive(Debug, Clone, Default)]
pub struct RecordForm {
    pub draft: EmployeeDraft,
    editing: Option<EmployeeId>,
    states: Vec<State>,
    pending: bool,
}

impl RecordForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow the shell's selected employee.
    ///
    /// `Some` replaces the draft wholesale (edit mode); `None` clears it (create mode).
    pub fn load(&mut self, selected: Option<&Employee>) {
        match selected {
            Some(emp) => {
                self.draft = EmployeeDraft::from_employee(emp);
                self.editing = Some(emp.id);
            }
            None => {
                self.draft = EmployeeDraft::default();
                self.editing = None;
            }
        }
    }

    /// Install the state reference list.
    pub fn set_states(&mut self, states: Vec<State>) {
        self.states = states;
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Name of the state currently picked in the draft.
    pub fn selected_state_name(&self) -> Option<&str> {
        let id: i64 = self.draft.state_id.trim().parse().ok()?;
        self.states.iter().find(|s| s.id == id).map(|s| s.name.as_str())
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn editing_id(&self) -> Option<EmployeeId> {
        self.editing
    }

    /// True while a create/update call is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() { "Edit Employee" } else { "Add Employee" }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() { "Update" } else { "Create" }
    }

    /// Every field is required. No format or range checks.
    pub fn validate(&self) -> Result<()> {
        for (label, value) in self.draft.fields() {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("{label} is required")));
            }
        }
        Ok(())
    }

    /// Build the service request for the current draft and mark the form pending.
    pub fn submit(&mut self) -> Result<SubmitRequest> {
        if self.pending {
            return Err(AppError::validation("A save is already in progress"));
        }
        self.validate()?;

        self.pending = true;
        let draft = self.draft.clone();
        Ok(match self.editing {
            Some(id) => SubmitRequest::Update { id, draft },
            None => SubmitRequest::Create { draft },
        })
    }

    /// Save succeeded: back to an empty create form.
    pub fn on_success(&mut self) {
        self.draft = EmployeeDraft::default();
        self.editing = None;
        self.pending = false;
    }

    /// Save failed: keep the draft for another attempt.
    pub fn on_failure(&mut self) {
        self.pending = false;
    }
}
