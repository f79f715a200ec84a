//! Customer authentication for the TR-Tech storefront.
//!
//! Provides the [`AuthGate`] consumed by checkout, account registration,
//! Argon2 password hashing, and sessions.

mod error;
mod gate;
mod memory;
mod password;
mod registration;
mod session;
mod user;

pub use error::AuthError;
pub use gate::AuthGate;
pub use memory::InMemoryAuthGate;
pub use password::PasswordHasher;
pub use registration::Registration;
pub use session::{AuthSession, SessionToken};
pub use user::{Role, User};
