//! State reference data.

use serde::{Deserialize, Serialize};

/// A state as served by the `State` resource. Read-only in this console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: i64,
    pub name: String,
}
