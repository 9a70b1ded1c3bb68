//! API credentials.
//!
//! The token is loaded once by the caller and handed to
//! [`ApiClient`](crate::api::ApiClient) explicitly. Nothing in the library
//! looks it up behind the caller's back.

use std::fmt;
use std::sync::Mutex;

use serde::Serialize;

use crate::error::{CoreError, Result, ValidationError};

const SERVICE: &str = "prajnayana";
const TOKEN_KEY: &str = "api_token";

/// Bearer credential for the REST API.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Somewhere to keep the token between runs.
pub trait TokenStore {
    fn load(&self) -> Result<Option<AuthToken>>;
    fn store(&self, token: &AuthToken) -> Result<()>;
    /// Removing an absent token is not an error.
    fn clear(&self) -> Result<()>;

    /// Load the token or fail with [`CoreError::Unauthorized`].
    fn require(&self) -> Result<AuthToken> {
        self.load()?
            .filter(|t| !t.is_empty())
            .ok_or(CoreError::Unauthorized)
    }
}

/// OS keyring backed store.
#[derive(Debug, Default)]
pub struct KeyringTokenStore;

impl KeyringTokenStore {
    fn entry() -> Result<keyring::Entry> {
        Ok(keyring::Entry::new(SERVICE, TOKEN_KEY)?)
    }
}

impl TokenStore for KeyringTokenStore {
    fn load(&self) -> Result<Option<AuthToken>> {
        match Self::entry()?.get_password() {
            Ok(pw) => Ok(Some(AuthToken::new(pw))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, token: &AuthToken) -> Result<()> {
        Self::entry()?.set_password(token.as_str())?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match Self::entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<AuthToken>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<AuthToken>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AuthToken>> {
        Ok(self.slot().clone())
    }

    fn store(&self, token: &AuthToken) -> Result<()> {
        *self.slot() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }
}

/// Body of `auth/register/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_birth: Option<i32>,
}

impl RegisterRequest {
    /// Checks that can be made before contacting the server.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "username".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}
