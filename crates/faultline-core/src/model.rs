//! Read-only request/response snapshots handed in by the framework.

use serde::{Deserialize, Serialize};

/// View of the failed request, taken when the failure surfaced. Carries only
/// what the summary line needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSnapshot {
    pub method: String,
    pub path: String,
}

impl RequestSnapshot {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }
}

/// View of the result the framework is about to commit for the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSnapshot {
    pub status_code: u16,
}

impl ResultSnapshot {
    pub fn new(status_code: u16) -> Self {
        Self { status_code }
    }
}
