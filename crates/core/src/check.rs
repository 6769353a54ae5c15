//! Check (alerting rule) wire types.
//!
//! A check is polymorphic over three variants (`deadman`, `threshold`,
//! `custom`). Each variant is modeled as an independent record holding
//! the shared base by composition and flattened into one JSON object on
//! the wire, with the `type` discriminator injected by serialization.

use serde::{Deserialize, Serialize};

use crate::label::Labels;
use crate::query::DashboardQuery;
use crate::threshold::Threshold;
use crate::types::{LastRunStatus, Links, StatusLevel, TaskStatus, Timestamp};

/// Per-check resource links returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owners: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Fields shared by every check variant.
///
/// Server-assigned fields (`id`, timestamps, links, last-run state) are
/// absent on create requests and populated in responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckBase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// The organization that owns this check.
    #[serde(rename = "orgID")]
    pub org_id: String,
    /// The user that created this check.
    #[serde(rename = "ownerID", skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// The task that executes this check on its schedule.
    #[serde(rename = "taskID", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub query: DashboardQuery,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<CheckLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    /// When the latest scheduled run completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_completed: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run_status: Option<LastRunStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run_error: Option<String>,
}

/// A tag written to every status generated by a check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// [`CheckBase`] plus the scheduling fields shared by the deadman and
/// threshold variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckBaseExt {
    #[serde(flatten)]
    pub base: CheckBase,
    /// Check repetition interval (duration literal, e.g. `1m`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub every: Option<String>,
    /// Delay after the schedule before executing the check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
    /// Template used to render the status message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<StatusTag>>,
}

/// Alerts when a series stops reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadmanCheck {
    #[serde(flatten)]
    pub base: CheckBaseExt,
    /// The status level recorded when the deadman triggers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<StatusLevel>,
    /// If only zero values were reported since `time_since`, trigger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_zero: Option<bool>,
    /// Duration after which a series is considered stale and no longer
    /// triggers the deadman.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale_time: Option<String>,
    /// Duration without data before the deadman triggers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_since: Option<String>,
}

/// Alerts when values cross one of an ordered list of thresholds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdCheck {
    #[serde(flatten)]
    pub base: CheckBaseExt,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub thresholds: Vec<Threshold>,
}

/// A check whose task the user manages directly; carries only the base
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomCheck {
    #[serde(flatten)]
    pub base: CheckBase,
}

/// One concrete check.
///
/// Serialization injects the variant's discriminator as the `type`
/// field. Decoding goes through [`crate::codec`], which dispatches on
/// the discriminator and rejects unknown values with
/// [`crate::codec::CodecError::InvalidInput`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Check {
    Deadman(DeadmanCheck),
    Threshold(ThresholdCheck),
    Custom(CustomCheck),
}

impl Check {
    /// The fixed discriminator string for this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Check::Deadman(_) => "deadman",
            Check::Threshold(_) => "threshold",
            Check::Custom(_) => "custom",
        }
    }
}

/// Paged collection of checks as returned by `GET /checks`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Checks {
    pub checks: Vec<Check>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// Request body for `PATCH /checks/{checkID}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}
