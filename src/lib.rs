pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod logging;
pub mod models;
pub mod session;
pub mod table;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use error::{AppError, Result};
