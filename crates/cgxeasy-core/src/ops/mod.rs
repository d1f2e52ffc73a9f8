// ── Reconciliation operations ──
//
// Every operation follows the same shape: resolve names through the
// caches, fetch the object to change, merge in memory, write it back once
// and report. Failures come back as `OpResult`s with `success == false`;
// nothing below the session boundary aborts a batch.

pub mod dhcp;
pub mod interface;
pub mod prefix;
pub mod snmp;
pub mod tunnel;
pub mod zone;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{CoreError, ErrorKind};

/// What an operation did to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Change {
    Created,
    Updated,
    Deleted,
    /// Desired state already held; no write was issued.
    Unchanged,
}

/// The `(success, message)` outcome of one operation on one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpResult {
    pub operation: String,
    pub target: String,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<Change>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl OpResult {
    pub fn failed(operation: &str, target: &str, err: &CoreError) -> Self {
        warn!("{operation} [{target}]: {err}");
        Self {
            operation: operation.into(),
            target: target.into(),
            success: false,
            message: err.to_string(),
            change: None,
            error: Some(err.kind()),
        }
    }

    /// `(success, message)` pair.
    pub fn as_pair(&self) -> (bool, &str) {
        (self.success, &self.message)
    }
}

/// Successful result of an operation body.
#[derive(Debug)]
pub(crate) struct Outcome {
    change: Change,
    message: String,
}

impl Outcome {
    pub(crate) fn new(change: Change, message: impl Into<String>) -> Self {
        Self {
            change,
            message: message.into(),
        }
    }
}

/// Log and package an operation body's result.
pub(crate) fn report(operation: &str, target: &str, result: Result<Outcome, CoreError>) -> OpResult {
    match result {
        Ok(outcome) => {
            info!(change = %outcome.change, "{operation} [{target}]: {}", outcome.message);
            OpResult {
                operation: operation.into(),
                target: target.into(),
                success: true,
                message: outcome.message,
                change: Some(outcome.change),
                error: None,
            }
        }
        Err(err) => OpResult::failed(operation, target, &err),
    }
}

/// Id of a fetched object that must have one.
pub(crate) fn require_id(id: Option<&String>, what: &str) -> Result<String, CoreError> {
    id.cloned()
        .ok_or_else(|| CoreError::Internal(format!("{what} returned without an id")))
}

/// Write back an emptied list as `null`.
pub(crate) fn none_if_empty<T>(list: Vec<T>) -> Option<Vec<T>> {
    if list.is_empty() { None } else { Some(list) }
}
