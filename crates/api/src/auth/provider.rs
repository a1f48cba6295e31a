//! Credential checks behind HTTP Basic and `POST /login`.
//!
//! The server ships a fixed two-account provider for demos. Anything that can
//! map a username and password to a [`Principal`] can replace it.

use async_trait::async_trait;
use serde::Serialize;
use staffhub_core::error::CoreError;
use staffhub_core::roles::{ROLE_ADMIN, ROLE_USER};

use super::password::{hash_password, verify_password};

/// An authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub username: String,
    pub role: String,
}

/// A plaintext username/password pair read from configuration.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// `Ok(None)` when the username is unknown or the password is wrong.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Principal>, CoreError>;
}

struct Account {
    username: String,
    password_hash: String,
    role: &'static str,
}

/// Two fixed accounts, one per role. Passwords are held only as Argon2id hashes.
pub struct StaticAuthProvider {
    accounts: Vec<Account>,
}

impl StaticAuthProvider {
    pub fn new(admin: &Credentials, user: &Credentials) -> Result<Self, CoreError> {
        let account = |creds: &Credentials, role| -> Result<Account, CoreError> {
            let password_hash = hash_password(&creds.password)
                .map_err(|e| CoreError::Internal(format!("Failed to hash password: {e}")))?;
            Ok(Account {
                username: creds.username.clone(),
                password_hash,
                role,
            })
        };

        Ok(Self {
            accounts: vec![account(admin, ROLE_ADMIN)?, account(user, ROLE_USER)?],
        })
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Principal>, CoreError> {
        let Some(account) = self.accounts.iter().find(|a| a.username == username) else {
            return Ok(None);
        };

        let valid = verify_password(password, &account.password_hash)
            .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))?;
        if !valid {
            return Ok(None);
        }

        Ok(Some(Principal {
            username: account.username.clone(),
            role: account.role.to_string(),
        }))
    }
}
