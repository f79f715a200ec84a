//! Account registration form.

use crate::password::PasswordHasher;
use crate::AuthError;
use serde::{Deserialize, Serialize};
use trtech_commerce::customer::{CustomerProfile, PostalAddress};

/// What a customer fills in to create an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing, default)]
    pub confirm_password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: PostalAddress,
}

impl Registration {
    /// Check the form before any account is created.
    ///
    /// Order of checks: required fields, password confirmation, strength.
    pub fn validate(&self) -> Result<(), AuthError> {
        let mut missing = Vec::new();
        if self.first_name.trim().is_empty() {
            missing.push("firstName");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.password.is_empty() {
            missing.push("password");
        }
        if !missing.is_empty() {
            return Err(AuthError::MissingFields(missing));
        }

        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        PasswordHasher::validate_password(&self.password)
    }

    /// Normalized email used as the account key.
    pub fn email_key(&self) -> String {
        self.email.trim().to_lowercase()
    }

    /// Profile stored for the new account.
    pub fn profile(&self) -> CustomerProfile {
        CustomerProfile {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.clone(),
        }
    }
}
