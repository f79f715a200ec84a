//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration with an email that already has an account.
    #[error("An account with email {0} already exists")]
    UserAlreadyExists(String),

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Password too weak.
    #[error("Password too weak: {0}")]
    WeakPassword(String),

    /// Required form fields were left empty.
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Operation needs a signed-in customer.
    #[error("Not signed in")]
    NotAuthenticated,

    /// Session expired.
    #[error("Session expired, please sign in again")]
    SessionExpired,

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// A remote auth provider rejected the call.
    #[error("{0}")]
    Provider(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::NotAuthenticated | AuthError::SessionExpired
        )
    }

    /// Check if the user can fix this in the form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AuthError::PasswordMismatch
                | AuthError::WeakPassword(_)
                | AuthError::MissingFields(_)
                | AuthError::UserAlreadyExists(_)
        )
    }
}
