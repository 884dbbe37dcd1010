//! Account flows — sign-up, profile edits, password change, guide applications.
//!
//! Every flow takes its backends as trait objects and re-reads the user from
//! the identity provider before acting on it.

use uuid::Uuid;

use crate::backend::BackendError;
use crate::backend::auth::{IdentityProvider, SignUpOutcome, User, UserAttributes, UserMetadata};
use crate::backend::profile::{ApplicationStatus, ProfilePatch, ProfileRow, ProfileStore};

use super::validate::{self, SignUpForm, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// What a profile screen shows.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ProfileView {
    pub id: Uuid,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub application_status: Option<ApplicationStatus>,
}

/// Result of a profile edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub user: User,
    /// The email changed and the new address must be confirmed before it
    /// takes effect.
    pub email_confirmation_required: bool,
}

/// Register with `first_name`, `last_name`, and `full_name` metadata.
///
/// # Errors
///
/// Returns [`AccountError`] on a rule violation or backend failure.
pub async fn sign_up(identity: &dyn IdentityProvider, form: &SignUpForm) -> Result<SignUpOutcome, AccountError> {
    let metadata = UserMetadata::from_names(&form.first_name, &form.last_name);
    Ok(identity.sign_up(&form.email, &form.password, &metadata).await?)
}

/// Merge the identity user's metadata with the profile row, if any.
///
/// Names come from the row when it has them, else from metadata (splitting
/// a legacy `full_name`).
///
/// # Errors
///
/// Returns [`AccountError::Backend`] if either backend call fails.
pub async fn load_profile(identity: &dyn IdentityProvider, profiles: &dyn ProfileStore) -> Result<ProfileView, AccountError> {
    let user = identity.get_user().await?;
    let row = profiles.select(user.id).await?;
    let (meta_first, meta_last) = user.user_metadata.names();

    let (first_name, last_name, application_status) = match row {
        Some(row) if row.first_name.as_deref().is_some_and(|f| !f.is_empty()) => {
            (row.first_name.unwrap_or_default(), row.last_name.unwrap_or_default(), row.application_status)
        }
        Some(row) => (meta_first, meta_last, row.application_status),
        None => (meta_first, meta_last, None),
    };
    Ok(ProfileView { id: user.id, email: user.email, first_name, last_name, application_status })
}

/// Save names (and optionally a new email) to the identity user, then mirror
/// the names into the profile row.
///
/// # Errors
///
/// Returns [`AccountError`] on a rule violation or backend failure.
pub async fn update_profile(
    identity: &dyn IdentityProvider,
    profiles: &dyn ProfileStore,
    first_name: &str,
    last_name: &str,
    email: Option<&str>,
) -> Result<ProfileUpdate, AccountError> {
    let (first_name, last_name) = validate::names(first_name, last_name)?;
    let current = identity.get_user().await?;

    let new_email = email
        .map(str::trim)
        .filter(|e| !e.is_empty() && Some(*e) != current.email.as_deref())
        .map(str::to_string);
    let email_confirmation_required = new_email.is_some();

    let attributes = UserAttributes {
        email: new_email,
        password: None,
        data: Some(UserMetadata::from_names(&first_name, &last_name)),
    };
    let user = identity.update_user(&attributes).await?;

    let existing = profiles.select(user.id).await?;
    let row = ProfileRow {
        id: user.id,
        first_name: Some(first_name),
        last_name: Some(last_name),
        application_status: existing.and_then(|r| r.application_status),
    };
    let saved = profiles.upsert(&row).await?;

    tracing::info!(user_id = %user.id, name = %saved.display_name(), email_confirmation_required, "profile updated");
    Ok(ProfileUpdate { user, email_confirmation_required })
}

/// # Errors
///
/// Returns [`AccountError`] on a rule violation or backend failure.
pub async fn change_password(identity: &dyn IdentityProvider, password: &str, confirm: &str) -> Result<(), AccountError> {
    validate::password_change(password, confirm)?;
    let attributes = UserAttributes { password: Some(password.to_string()), ..UserAttributes::default() };
    let user = identity.update_user(&attributes).await?;
    tracing::info!(user_id = %user.id, "password changed");
    Ok(())
}

/// Mark the signed-in user's guide application as pending.
///
/// # Errors
///
/// Returns [`AccountError::Backend`] if either backend call fails.
pub async fn apply_as_guide(identity: &dyn IdentityProvider, profiles: &dyn ProfileStore) -> Result<(), AccountError> {
    let user = identity.get_user().await?;
    let patch = ProfilePatch { application_status: Some(ApplicationStatus::Pending), ..ProfilePatch::default() };
    profiles.update(user.id, &patch).await?;
    tracing::info!(user_id = %user.id, "guide application submitted");
    Ok(())
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
