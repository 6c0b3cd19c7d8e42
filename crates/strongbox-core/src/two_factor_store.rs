use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

/// An error resulting from operations on a token store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An internal unspecified error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Storage for remembered two-factor tokens, issued by the server after a completed
/// two-factor challenge with "remember this device" selected.
///
/// Tokens are keyed strictly by normalized (lower-cased, trimmed) account email; a token stored
/// for one account must never be returned for another.
#[async_trait]
pub trait TwoFactorTokenStore: Send + Sync {
    /// Retrieves the remembered token for `email`, if one exists.
    async fn get(&self, email: &str) -> Result<Option<String>, StoreError>;
    /// Stores `token` for `email`, unconditionally replacing any existing value.
    async fn set(&self, email: &str, token: String) -> Result<(), StoreError>;
}

/// Process-local [TwoFactorTokenStore], used when the host application does not supply a
/// persistent implementation.
#[derive(Debug, Default)]
pub struct InMemoryTwoFactorTokenStore {
    tokens: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl TwoFactorTokenStore for InMemoryTwoFactorTokenStore {
    async fn get(&self, email: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .tokens
            .read()
            .expect("RwLock is not poisoned")
            .get(email)
            .cloned())
    }

    async fn set(&self, email: &str, token: String) -> Result<(), StoreError> {
        self.tokens
            .write()
            .expect("RwLock is not poisoned")
            .insert(email.to_owned(), token);
        Ok(())
    }
}
