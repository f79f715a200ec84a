//! The auth gate consumed by checkout.

use crate::registration::Registration;
use crate::user::User;
use crate::AuthError;
use async_trait::async_trait;
use trtech_commerce::customer::CustomerProfile;

/// Current user plus sign-in and registration.
///
/// Checkout reads the live auth state each time it opens and calls
/// [`login`](AuthGate::login) or [`register`](AuthGate::register) from the
/// `Auth` step. A successful call leaves the gate signed in as the
/// returned user.
#[async_trait]
pub trait AuthGate: Send + Sync {
    /// The signed-in user, or [`User::Anonymous`].
    async fn current_user(&self) -> User;

    /// Sign in with email and password.
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Create an account and sign in as it.
    async fn register(&self, registration: Registration) -> Result<User, AuthError>;

    /// Sign out. Signing out while anonymous is a no-op.
    async fn logout(&self) -> Result<(), AuthError>;

    async fn is_authenticated(&self) -> bool {
        self.current_user().await.is_authenticated()
    }

    /// Profile of the signed-in user, used to pre-fill delivery details.
    async fn current_profile(&self) -> Option<CustomerProfile> {
        self.current_user().await.profile().cloned()
    }
}
