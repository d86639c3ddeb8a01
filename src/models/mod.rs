//! Data models for employees and reference states.

pub mod employee;
pub mod state;

pub use employee::{Employee, EmployeeDraft, EmployeeId, Gender, format_salary, parse_flexible_date};
pub use state::State;
