//! REST client for the `/checks` endpoints.
//!
//! [`ChecksApi`] wraps the checks resource of the Stratus HTTP API
//! (list, create, get, update, patch, delete, plus the per-check label
//! and query sub-resources) using [`reqwest`]. Check bodies go through
//! the polymorphic codec in `stratus-core`, so the `type` discriminator
//! is always derived from the variant and never hand-written.

use reqwest::{header, Method};
use stratus_core::{
    codec, Check, CheckPatch, Checks, FluxResponse, LabelMapping, LabelResponse, LabelsResponse,
};

use crate::error::{decode_error, ApiError};

/// HTTP client for the checks resource of one Stratus server.
pub struct ChecksApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// Query parameters for [`ChecksApi::list_checks`].
#[derive(Debug, Clone)]
pub struct ListChecksParams {
    /// Only list checks owned by this organization.
    pub org_id: String,
    /// Maximum number of records to return (server default is 20).
    pub limit: Option<u32>,
    /// Number of records to skip, for pagination.
    pub offset: Option<u32>,
}

impl ListChecksParams {
    /// Parameters listing all checks of one organization.
    pub fn new(org_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            limit: None,
            offset: None,
        }
    }

    /// The query pairs this parameter set contributes to the URL.
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("orgID", self.org_id.clone())];
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

impl ChecksApi {
    /// Create a new API client.
    ///
    /// * `base_url` - API root, e.g. `http://host:8086/api/v2`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across resources).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client,
            base_url,
            token: None,
        }
    }

    /// Send an API token as `Authorization: Token <token>` on every
    /// request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// List checks, optionally paged.
    ///
    /// Sends `GET /checks`. Each element of the response is decoded
    /// independently through the polymorphic codec; one bad element
    /// fails the whole call.
    pub async fn list_checks(&self, params: &ListChecksParams) -> Result<Checks, ApiError> {
        let response = self
            .request(Method::GET, "/checks")
            .query(&params.query())
            .send()
            .await?;
        let body = Self::success_body(response).await?;
        let checks = codec::decode_checks(&body)?;
        tracing::debug!(org_id = %params.org_id, count = checks.checks.len(), "listed checks");
        Ok(checks)
    }

    /// Add a new check.
    ///
    /// Sends `POST /checks`. Returns the server's copy, including the
    /// assigned `id` and timestamps.
    pub async fn create_check(&self, check: &Check) -> Result<Check, ApiError> {
        let body = codec::encode_check(check)?;
        let response = self
            .request(Method::POST, "/checks")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let body = Self::success_body(response).await?;
        let created = codec::decode_check(&body)?;
        tracing::debug!(kind = created.kind(), "created check");
        Ok(created)
    }

    /// Retrieve a check by ID. Sends `GET /checks/{checkID}`.
    pub async fn get_check(&self, check_id: &str) -> Result<Check, ApiError> {
        let response = self
            .request(Method::GET, &format!("/checks/{check_id}"))
            .send()
            .await?;
        let body = Self::success_body(response).await?;
        Ok(codec::decode_check(&body)?)
    }

    /// Replace a check. Sends `PUT /checks/{checkID}`.
    pub async fn update_check(&self, check_id: &str, check: &Check) -> Result<Check, ApiError> {
        let body = codec::encode_check(check)?;
        let response = self
            .request(Method::PUT, &format!("/checks/{check_id}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let body = Self::success_body(response).await?;
        Ok(codec::decode_check(&body)?)
    }

    /// Update a check's name, description, or status.
    /// Sends `PATCH /checks/{checkID}`.
    pub async fn patch_check(
        &self,
        check_id: &str,
        patch: &CheckPatch,
    ) -> Result<Check, ApiError> {
        let response = self
            .request(Method::PATCH, &format!("/checks/{check_id}"))
            .json(patch)
            .send()
            .await?;
        let body = Self::success_body(response).await?;
        Ok(codec::decode_check(&body)?)
    }

    /// Delete a check. Sends `DELETE /checks/{checkID}`.
    pub async fn delete_check(&self, check_id: &str) -> Result<(), ApiError> {
        let response = self
            .request(Method::DELETE, &format!("/checks/{check_id}"))
            .send()
            .await?;
        Self::success_body(response).await?;
        tracing::debug!(check_id, "deleted check");
        Ok(())
    }

    /// List the labels attached to a check.
    /// Sends `GET /checks/{checkID}/labels`.
    pub async fn list_check_labels(&self, check_id: &str) -> Result<LabelsResponse, ApiError> {
        let response = self
            .request(Method::GET, &format!("/checks/{check_id}/labels"))
            .send()
            .await?;
        let body = Self::success_body(response).await?;
        Self::parse_json(&body)
    }

    /// Attach an existing label to a check.
    /// Sends `POST /checks/{checkID}/labels`.
    pub async fn add_check_label(
        &self,
        check_id: &str,
        mapping: &LabelMapping,
    ) -> Result<LabelResponse, ApiError> {
        let response = self
            .request(Method::POST, &format!("/checks/{check_id}/labels"))
            .json(mapping)
            .send()
            .await?;
        let body = Self::success_body(response).await?;
        Self::parse_json(&body)
    }

    /// Detach a label from a check.
    /// Sends `DELETE /checks/{checkID}/labels/{labelID}`.
    pub async fn delete_check_label(
        &self,
        check_id: &str,
        label_id: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .request(
                Method::DELETE,
                &format!("/checks/{check_id}/labels/{label_id}"),
            )
            .send()
            .await?;
        Self::success_body(response).await?;
        Ok(())
    }

    /// Retrieve the rendered query a check executes.
    /// Sends `GET /checks/{checkID}/query`.
    pub async fn get_check_query(&self, check_id: &str) -> Result<FluxResponse, ApiError> {
        let response = self
            .request(Method::GET, &format!("/checks/{check_id}/query"))
            .send()
            .await?;
        let body = Self::success_body(response).await?;
        Self::parse_json(&body)
    }

    // ---- private helpers ----

    /// Start a request for `path` relative to the API root, attaching
    /// the auth token when configured.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, format!("Token {token}"));
        }
        request
    }

    /// Read the full response body, converting non-2xx statuses into
    /// [`ApiError::Api`] via the server's error payload.
    async fn success_body(response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(decode_error(status.as_u16(), &bytes));
        }
        Ok(bytes.to_vec())
    }

    /// Parse a successful JSON response body into the expected type.
    fn parse_json<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
        Ok(serde_json::from_slice(body).map_err(stratus_core::CodecError::Malformed)?)
    }
}
