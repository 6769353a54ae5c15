//! Scalar and enum types shared across the checks model.

use serde::{Deserialize, Serialize};

/// All timestamps are UTC, RFC 3339 on the wire.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The status level a check records when a criterion matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusLevel {
    Ok,
    Info,
    Warn,
    Crit,
    Unknown,
}

/// Scheduling state of the task backing a check.
///
/// `inactive` cancels scheduled runs and prevents manual runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Inactive,
}

/// Outcome of the latest run of the backing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastRunStatus {
    Canceled,
    Failed,
    Success,
}

/// URI pointers for paged collection responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// URI of this page.
    #[serde(rename = "self")]
    pub self_link: String,
    /// URI of the next page, when more results exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// URI of the previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}
