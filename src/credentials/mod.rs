//! # Credential storage
//!
//! The API key lives in a flat, persistent key-value store. [`KeyValueStore`]
//! is the seam between the credential logic and where the bytes end up:
//!
//! - [`fs::FileStore`]: a JSON object in the user's data directory
//! - [`memory::InMemoryStore`]: no persistence, for tests and embedding
//!
//! [`CredentialStore`] sits on top and owns the single provider key: it
//! validates candidates before writing and never logs the secret.

use crate::Error;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

pub mod fs;
pub mod memory;

pub use fs::FileStore;
pub use memory::InMemoryStore;

/// Store key under which the provider API key is kept.
pub const CREDENTIAL_KEY: &str = "openai_api_key";

/// Every accepted key must begin with this.
pub const KEY_PREFIX: &str = "sk-";

/// A flat, persistent string-to-string store.
///
/// Reading an absent key yields `None`, writing overwrites, removing an
/// absent key is not an error.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    fn remove(&self, key: &str) -> Result<(), Error>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        (**self).remove(key)
    }
}

/// An API key read from the store.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Credential(value.into())
    }

    /// The raw key, for the authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// A display form that keeps the prefix and the last four characters.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() < 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

/// Reads, validates and writes the single provider API key.
#[derive(Debug, Clone)]
pub struct CredentialStore<S> {
    backend: S,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// The stored key, or `None` if it was never saved or has been cleared.
    pub fn get(&self) -> Result<Option<Credential>, Error> {
        Ok(self.backend.get(CREDENTIAL_KEY)?.map(Credential))
    }

    /// Validate `candidate` and persist it, replacing any earlier key.
    ///
    /// The candidate is stored exactly as given. A rejected candidate leaves
    /// the stored value untouched.
    pub fn save(&self, candidate: &str) -> Result<(), Error> {
        validate(candidate)?;
        self.backend.set(CREDENTIAL_KEY, candidate)?;
        info!("api key saved");
        Ok(())
    }

    /// Remove the stored key. Clearing an empty store is a no-op.
    pub fn clear(&self) -> Result<(), Error> {
        self.backend.remove(CREDENTIAL_KEY)?;
        info!("api key cleared");
        Ok(())
    }
}

/// Superficial format check applied before a key is saved.
pub fn validate(candidate: &str) -> Result<(), Error> {
    if candidate.trim().is_empty() {
        debug!("rejected blank api key");
        return Err(Error::EmptyKey);
    }
    if !candidate.starts_with(KEY_PREFIX) {
        debug!("rejected api key without expected prefix");
        return Err(Error::MalformedKey {
            expected_prefix: KEY_PREFIX,
        });
    }
    Ok(())
}
