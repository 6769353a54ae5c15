//! Label types attached to checks and their request/response envelopes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::Links;

/// A user-defined label that can be attached to a check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The organization that owns this label.
    #[serde(rename = "orgID", skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Key/value pairs associated with the label (e.g. `color`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, String>>,
}

/// Collection of labels as embedded in a check.
pub type Labels = Vec<Label>;

/// Request body for attaching an existing label to a check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMapping {
    #[serde(rename = "labelID", skip_serializing_if = "Option::is_none")]
    pub label_id: Option<String>,
}

/// Response envelope for a single label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// Response envelope for the labels of a check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}
