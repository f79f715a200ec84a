//! In-process auth gate.
//!
//! Accounts and the active session live in memory. Used by the CLI and by
//! tests; a hosted provider implements [`AuthGate`] the same way.

use crate::gate::AuthGate;
use crate::password::PasswordHasher;
use crate::registration::Registration;
use crate::session::AuthSession;
use crate::user::{Role, User};
use crate::AuthError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, info, warn};
use trtech_commerce::customer::CustomerProfile;
use trtech_commerce::ids::UserId;

#[derive(Debug, Clone)]
struct Account {
    id: UserId,
    profile: CustomerProfile,
    password_hash: String,
    roles: Vec<Role>,
}

impl Account {
    fn user(&self) -> User {
        User::Authenticated {
            id: self.id.clone(),
            profile: self.profile.clone(),
            roles: self.roles.clone(),
        }
    }
}

/// Auth gate backed by in-memory accounts.
#[derive(Debug, Default)]
pub struct InMemoryAuthGate {
    accounts: RwLock<HashMap<String, Account>>,
    session: RwLock<Option<AuthSession>>,
    hasher: PasswordHasher,
}

impl InMemoryAuthGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom password hasher.
    pub fn with_hasher(hasher: PasswordHasher) -> Self {
        Self {
            hasher,
            ..Self::default()
        }
    }

    /// Create an account without signing in.
    pub fn create_account(&self, registration: &Registration) -> Result<UserId, AuthError> {
        self.create_account_with_roles(registration, vec![Role::Customer])
    }

    /// Create an account with explicit roles, without signing in.
    pub fn create_account_with_roles(
        &self,
        registration: &Registration,
        roles: Vec<Role>,
    ) -> Result<UserId, AuthError> {
        registration.validate()?;
        let key = registration.email_key();

        if self.read_accounts().contains_key(&key) {
            return Err(AuthError::UserAlreadyExists(registration.email.trim().to_string()));
        }

        let password_hash = self.hasher.hash(&registration.password)?;
        let account = Account {
            id: UserId::generate(),
            profile: registration.profile(),
            password_hash,
            roles,
        };
        let id = account.id.clone();

        let mut accounts = self.write_accounts();
        if accounts.contains_key(&key) {
            return Err(AuthError::UserAlreadyExists(registration.email.trim().to_string()));
        }
        accounts.insert(key, account);
        info!(user_id = %id, "account created");
        Ok(id)
    }

    /// Number of stored accounts.
    pub fn account_count(&self) -> usize {
        self.read_accounts().len()
    }

    fn sign_in(&self, account: &Account) -> User {
        let session = AuthSession::start(account.id.clone());
        *self
            .session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(session);
        account.user()
    }

    fn read_accounts(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Account>> {
        self.accounts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_accounts(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Account>> {
        self.accounts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AuthGate for InMemoryAuthGate {
    async fn current_user(&self) -> User {
        let session = self
            .session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        let Some(session) = session else {
            return User::Anonymous;
        };
        if session.is_expired() {
            debug!(user_id = %session.user_id, "session expired");
            return User::Anonymous;
        }

        self.read_accounts()
            .values()
            .find(|a| a.id == session.user_id)
            .map(Account::user)
            .unwrap_or_default()
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            let mut missing = Vec::new();
            if email.trim().is_empty() {
                missing.push("email");
            }
            if password.is_empty() {
                missing.push("password");
            }
            return Err(AuthError::MissingFields(missing));
        }

        let account = self
            .read_accounts()
            .get(&email.trim().to_lowercase())
            .cloned();
        let Some(account) = account else {
            warn!("login for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &account.password_hash)? {
            warn!(user_id = %account.id, "login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %account.id, "signed in");
        Ok(self.sign_in(&account))
    }

    async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        self.create_account(&registration)?;
        let account = self
            .read_accounts()
            .get(&registration.email_key())
            .cloned()
            .ok_or_else(|| AuthError::Internal("account vanished after creation".to_string()))?;
        Ok(self.sign_in(&account))
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let previous = self
            .session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(session) = previous {
            info!(user_id = %session.user_id, "signed out");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trtech_commerce::customer::PostalAddress;

    fn gate() -> InMemoryAuthGate {
        InMemoryAuthGate::with_hasher(PasswordHasher::with_costs(1024, 1).unwrap())
    }

    fn registration() -> Registration {
        Registration {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john@x.com".into(),
            password: "Secret123".into(),
            confirm_password: "Secret123".into(),
            phone: "0820000000".into(),
            address: PostalAddress::new("1 Main St", "Joburg", "2000", "Gauteng"),
        }
    }

    #[tokio::test]
    async fn test_starts_anonymous() {
        let gate = gate();
        assert!(!gate.is_authenticated().await);
        assert!(gate.current_profile().await.is_none());
    }

    #[tokio::test]
    async fn test_register_signs_in() {
        let gate = gate();
        let user = gate.register(registration()).await.unwrap();
        assert!(user.is_authenticated());
        assert_eq!(gate.current_profile().await.unwrap().full_name(), "John Doe");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let gate = gate();
        gate.create_account(&registration()).unwrap();

        let mut again = registration();
        again.email = "JOHN@x.com".into();
        assert!(matches!(
            gate.register(again).await,
            Err(AuthError::UserAlreadyExists(_))
        ));
        assert_eq!(gate.account_count(), 1);
    }

    #[tokio::test]
    async fn test_register_mismatch_creates_nothing() {
        let gate = gate();
        let mut form = registration();
        form.confirm_password = "Other123".into();
        assert_eq!(gate.register(form).await, Err(AuthError::PasswordMismatch));
        assert_eq!(gate.account_count(), 0);
        assert!(!gate.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let gate = gate();
        gate.create_account(&registration()).unwrap();

        assert_eq!(
            gate.login("john@x.com", "wrong").await,
            Err(AuthError::InvalidCredentials)
        );
        assert!(!gate.is_authenticated().await);

        let user = gate.login(" John@X.com", "Secret123").await.unwrap();
        assert_eq!(user.email(), Some("john@x.com"));
        assert!(gate.is_authenticated().await);

        gate.logout().await.unwrap();
        assert!(!gate.is_authenticated().await);
        gate.logout().await.unwrap();
    }

    #[tokio::test]
    async fn test_login_requires_fields() {
        assert_eq!(
            gate().login("", "").await,
            Err(AuthError::MissingFields(vec!["email", "password"]))
        );
    }

    #[tokio::test]
    async fn test_admin_role() {
        let gate = gate();
        gate.create_account_with_roles(&registration(), vec![Role::Admin])
            .unwrap();
        let user = gate.login("john@x.com", "Secret123").await.unwrap();
        assert!(user.has_role(Role::Admin));
    }
}
