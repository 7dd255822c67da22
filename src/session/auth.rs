use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::domain::{Role, User};

/// A failure talking to the credential collaborator. Bad credentials are not
/// an error; they come back as `Ok(None)`.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
#[error("authentication service unavailable: {0}")]
pub struct AuthUnavailable(pub String);

/// The external collaborator that verifies credentials.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, AuthUnavailable>;
}

#[derive(Clone)]
struct Account {
    user: User,
    password: String,
}

/// In-memory credential records standing in for a real identity service.
#[derive(Clone)]
pub struct AccountDirectory {
    accounts: Vec<Account>,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self { accounts: Vec::new() }
    }

    pub fn with_account(mut self, user: User, password: impl Into<String>) -> Self {
        self.accounts.push(Account {
            user,
            password: password.into(),
        });
        self
    }

    /// The two demo accounts the canteen ships with.
    pub fn demo() -> Self {
        Self::new()
            .with_account(User::new("student1", "student@college.com", Role::Student), "password123")
            .with_account(User::new("admin1", "admin@college.com", Role::Admin), "adminpassword")
    }
}

impl Default for AccountDirectory {
    fn default() -> Self {
        Self::demo()
    }
}

#[async_trait]
impl Authenticator for AccountDirectory {
    #[instrument(skip(self, password))]
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, AuthUnavailable> {
        debug!("Checking credentials");
        let found = self
            .accounts
            .iter()
            .find(|account| account.user.email == email && account.password == password)
            .map(|account| account.user.clone());

        match &found {
            Some(user) => info!(user_id = %user.id, role = %user.role, "Credentials accepted"),
            None => info!("Credentials rejected"),
        }
        Ok(found)
    }
}
