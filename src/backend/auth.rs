//! Identity service — password sign-in, sign-up, sign-out, user updates.
//!
//! ARCHITECTURE
//! ============
//! The current session lives in a `tokio::sync::watch` channel. The client
//! is its only writer; screens and services hold receivers and see every
//! sign-in, sign-out, and user update as it happens.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use uuid::Uuid;

use super::{BackendError, BackendHttp};

// =============================================================================
// TYPES
// =============================================================================

/// Profile metadata stored on the identity user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl UserMetadata {
    /// Metadata for a first/last name pair, with `full_name` derived.
    #[must_use]
    pub fn from_names(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            full_name: Some(format!("{first_name} {last_name}").trim().to_string()),
        }
    }

    /// Best-effort `(first, last)` split.
    ///
    /// Separate names win. Older accounts only carry `full_name`; its first
    /// word becomes the first name and the rest the last name.
    #[must_use]
    pub fn names(&self) -> (String, String) {
        if let Some(first) = self.first_name.as_deref().filter(|f| !f.is_empty()) {
            return (first.to_string(), self.last_name.clone().unwrap_or_default());
        }
        if let Some(full) = self.full_name.as_deref().filter(|f| !f.is_empty()) {
            let mut parts = full.split(' ');
            let first = parts.next().unwrap_or_default().to_string();
            let last = parts.collect::<Vec<_>>().join(" ");
            return (first, last);
        }
        (String::new(), String::new())
    }
}

/// An identity user. Opaque beyond these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// A signed-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: User,
}

/// Result of a sign-up: either an immediate session, or a user that must
/// confirm their email first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    SignedIn(Session),
    ConfirmationRequired(User),
}

/// Fields accepted by a user update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<UserMetadata>,
}

// =============================================================================
// TRAIT
// =============================================================================

/// Hosted identity provider. Enables mocking in tests.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The current session, if signed in.
    fn get_session(&self) -> Option<Session>;

    /// Receiver that observes every session change.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    async fn sign_up(&self, email: &str, password: &str, metadata: &UserMetadata) -> Result<SignUpOutcome, BackendError>;

    async fn sign_out(&self) -> Result<(), BackendError>;

    /// Fetch the signed-in user fresh from the provider.
    async fn get_user(&self) -> Result<User, BackendError>;

    async fn update_user(&self, attributes: &UserAttributes) -> Result<User, BackendError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct GoTrueClient {
    http: BackendHttp,
    session: watch::Sender<Option<Session>>,
}

impl GoTrueClient {
    #[must_use]
    pub fn new(http: BackendHttp) -> Self {
        let (session, _) = watch::channel(None);
        Self { http, session }
    }

    /// Adopt an access token obtained earlier (e.g. from a previous sign-in)
    /// by resolving its user.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the token is rejected.
    pub async fn restore_session(&self, access_token: &str) -> Result<Session, BackendError> {
        let body = self
            .http
            .send(self.http.request(reqwest::Method::GET, "/auth/v1/user", Some(access_token)))
            .await?;
        let user = parse_user(&body)?;
        let session = Session { access_token: access_token.to_string(), refresh_token: None, expires_in: None, user };
        self.session.send_replace(Some(session.clone()));
        Ok(session)
    }

    fn access_token(&self) -> Result<String, BackendError> {
        self.session
            .borrow()
            .as_ref()
            .map(|s| s.access_token.clone())
            .ok_or(BackendError::NotSignedIn)
    }
}

#[async_trait::async_trait]
impl IdentityProvider for GoTrueClient {
    fn get_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let request = self
            .http
            .request(reqwest::Method::POST, "/auth/v1/token?grant_type=password", None)
            .json(&serde_json::json!({ "email": email, "password": password }));
        let session = parse_session(&self.http.send(request).await?)?;
        tracing::info!(user_id = %session.user.id, "signed in");
        self.session.send_replace(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str, metadata: &UserMetadata) -> Result<SignUpOutcome, BackendError> {
        let request = self
            .http
            .request(reqwest::Method::POST, "/auth/v1/signup", None)
            .json(&serde_json::json!({ "email": email, "password": password, "data": metadata }));
        let outcome = parse_sign_up(&self.http.send(request).await?)?;
        match &outcome {
            SignUpOutcome::SignedIn(session) => {
                tracing::info!(user_id = %session.user.id, "signed up and signed in");
                self.session.send_replace(Some(session.clone()));
            }
            SignUpOutcome::ConfirmationRequired(user) => {
                tracing::info!(user_id = %user.id, "signed up; email confirmation pending");
            }
        }
        Ok(outcome)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let token = self.access_token()?;
        let request = self.http.request(reqwest::Method::POST, "/auth/v1/logout", Some(&token));
        let result = self.http.send(request).await;
        // Local session is cleared even when the server call fails.
        self.session.send_replace(None);
        result.map(|_| ())
    }

    async fn get_user(&self) -> Result<User, BackendError> {
        let token = self.access_token()?;
        let body = self
            .http
            .send(self.http.request(reqwest::Method::GET, "/auth/v1/user", Some(&token)))
            .await?;
        parse_user(&body)
    }

    async fn update_user(&self, attributes: &UserAttributes) -> Result<User, BackendError> {
        let token = self.access_token()?;
        let request = self
            .http
            .request(reqwest::Method::PUT, "/auth/v1/user", Some(&token))
            .json(attributes);
        let user = parse_user(&self.http.send(request).await?)?;
        self.session.send_modify(|current| {
            if let Some(session) = current {
                session.user = user.clone();
            }
        });
        Ok(user)
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_session(body: &str) -> Result<Session, BackendError> {
    serde_json::from_str(body).map_err(|e| BackendError::Parse(format!("session: {e}")))
}

/// Accepts both a bare user object and `{ "user": { ... } }`.
fn parse_user(body: &str) -> Result<User, BackendError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| BackendError::Parse(e.to_string()))?;
    let user_value = match value.get("user") {
        Some(inner) if inner.is_object() => inner.clone(),
        _ => value,
    };
    serde_json::from_value(user_value).map_err(|e| BackendError::Parse(format!("user: {e}")))
}

/// Sign-up returns a full session when email confirmation is off, and just
/// the user when it is on.
fn parse_sign_up(body: &str) -> Result<SignUpOutcome, BackendError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| BackendError::Parse(e.to_string()))?;
    if value.get("access_token").is_some_and(serde_json::Value::is_string) {
        let session = serde_json::from_value(value).map_err(|e| BackendError::Parse(format!("session: {e}")))?;
        return Ok(SignUpOutcome::SignedIn(session));
    }
    parse_user(body).map(SignUpOutcome::ConfirmationRequired)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
