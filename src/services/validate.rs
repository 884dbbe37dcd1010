//! Form rules for sign-in, sign-up, and password change.
//!
//! Each function trims what it should and hands back the cleaned values, so
//! callers never send untrimmed names to the backend.

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("email and password are required")]
    MissingCredentials,
    #[error("first and last name are required")]
    MissingName,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Cleaned sign-up input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Returns the trimmed email.
///
/// # Errors
///
/// [`ValidationError::MissingCredentials`] if either field is blank.
pub fn sign_in_form(email: &str, password: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(email.to_string())
}

/// # Errors
///
/// [`ValidationError::MissingName`] before [`ValidationError::MissingCredentials`].
pub fn sign_up_form(email: &str, password: &str, first_name: &str, last_name: &str) -> Result<SignUpForm, ValidationError> {
    let (first_name, last_name) = names(first_name, last_name)?;
    let email = sign_in_form(email, password)?;
    Ok(SignUpForm { email, password: password.to_string(), first_name, last_name })
}

/// Trimmed `(first, last)`; both must be non-empty.
///
/// # Errors
///
/// [`ValidationError::MissingName`] if either is blank.
pub fn names(first_name: &str, last_name: &str) -> Result<(String, String), ValidationError> {
    let (first, last) = (first_name.trim(), last_name.trim());
    if first.is_empty() || last.is_empty() {
        return Err(ValidationError::MissingName);
    }
    Ok((first.to_string(), last.to_string()))
}

/// # Errors
///
/// [`ValidationError::PasswordMismatch`] first, then
/// [`ValidationError::PasswordTooShort`].
pub fn password_change(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LEN });
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
