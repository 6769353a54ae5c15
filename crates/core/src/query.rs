//! Query definition embedded in every check.

use serde::{Deserialize, Serialize};

/// How the query was authored in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryEditMode {
    Advanced,
    Builder,
}

/// The query a check evaluates against the time-series store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    /// Query source text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_mode: Option<QueryEditMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Response from `GET /checks/{checkID}/query`: the rendered query text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluxResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flux: Option<String>,
}
