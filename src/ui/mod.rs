//! UI module for the employee console.

pub mod app;
pub mod components;
pub mod form_panel;
pub mod table_panel;

pub use app::App;
