//! Profile rows in the hosted `profiles` table.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BackendError, BackendHttp};

const PROFILES_PATH: &str = "/rest/v1/profiles";

/// Guide application state. Unknown values from newer backends map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Other,
}

/// One row of `profiles`, keyed by the identity user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: Uuid,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_status: Option<ApplicationStatus>,
}

impl ProfileRow {
    #[must_use]
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or_default();
        let last = self.last_name.as_deref().unwrap_or_default();
        format!("{first} {last}").trim().to_string()
    }
}

/// Partial update for a profile row. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_status: Option<ApplicationStatus>,
}

/// Row storage for profiles. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// The profile for `user_id`, or `None` if no row exists yet.
    async fn select(&self, user_id: Uuid) -> Result<Option<ProfileRow>, BackendError>;

    /// Insert or merge a full row.
    async fn upsert(&self, row: &ProfileRow) -> Result<ProfileRow, BackendError>;

    async fn update(&self, user_id: Uuid, patch: &ProfilePatch) -> Result<(), BackendError>;
}

/// PostgREST-backed profile store, authorized by a session access token.
pub struct PostgrestProfiles {
    http: BackendHttp,
    access_token: String,
}

impl PostgrestProfiles {
    #[must_use]
    pub fn new(http: BackendHttp, access_token: impl Into<String>) -> Self {
        Self { http, access_token: access_token.into() }
    }

    fn request(&self, method: reqwest::Method, user_id: Option<Uuid>) -> reqwest::RequestBuilder {
        let request = self.http.request(method, PROFILES_PATH, Some(&self.access_token));
        match user_id {
            Some(id) => request.query(&[("id", format!("eq.{id}"))]),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl ProfileStore for PostgrestProfiles {
    async fn select(&self, user_id: Uuid) -> Result<Option<ProfileRow>, BackendError> {
        let request = self
            .request(reqwest::Method::GET, Some(user_id))
            .query(&[("select", "*")])
            .header(reqwest::header::ACCEPT, "application/json");
        let rows = parse_rows(&self.http.send(request).await?)?;
        Ok(rows.into_iter().next())
    }

    async fn upsert(&self, row: &ProfileRow) -> Result<ProfileRow, BackendError> {
        let request = self
            .request(reqwest::Method::POST, None)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(row);
        let rows = parse_rows(&self.http.send(request).await?)?;
        tracing::debug!(user_id = %row.id, "profile upserted");
        Ok(rows.into_iter().next().unwrap_or_else(|| row.clone()))
    }

    async fn update(&self, user_id: Uuid, patch: &ProfilePatch) -> Result<(), BackendError> {
        let request = self
            .request(reqwest::Method::PATCH, Some(user_id))
            .header("Prefer", "return=minimal")
            .json(patch);
        self.http.send(request).await?;
        tracing::debug!(%user_id, "profile updated");
        Ok(())
    }
}

/// Row responses are always JSON arrays; an empty body means no rows.
fn parse_rows(body: &str) -> Result<Vec<ProfileRow>, BackendError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(body).map_err(|e| BackendError::Parse(format!("profiles: {e}")))
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
