//! Named secret storage
//!
//! The collection job keeps four secrets: the OAuth2 client id and secret, and the
//! current access/refresh token pair. They live in an external parameter store that
//! is only reachable through [`CredentialStore::get`] and [`CredentialStore::put`].
//! The store has no versioning; a `put` with `overwrite` replaces the previous value.

mod file_store;
mod memory_store;

pub use file_store::FileCredentialStore;
pub use memory_store::MemoryCredentialStore;

use crate::Result;

/// Logical name of the OAuth2 client id
pub const CLIENT_ID: &str = "Fitbit_Client_ID";

/// Logical name of the OAuth2 client secret
pub const CLIENT_SECRET: &str = "Fitbit_Client_Secret";

/// Logical name of the current access token
pub const ACCESS_TOKEN: &str = "Fitbit_Access_Token";

/// Logical name of the current refresh token
pub const REFRESH_TOKEN: &str = "Fitbit_Refresh_Token";

/// A key/value store for secrets.
#[expect(async_fn_in_trait, reason = "stores are driven on a current-thread runtime")]
pub trait CredentialStore {
    /// Read the value stored under `name`.
    ///
    /// `decrypt` asks the store to return the plaintext of an encrypted value.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown or the value cannot be read.
    async fn get(&self, name: &str, decrypt: bool) -> Result<String>;

    /// Store `value` under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name exists and `overwrite` is false, or if the write fails.
    async fn put(&mut self, name: &str, value: &str, overwrite: bool) -> Result<()>;
}

/// The OAuth2 client registration used to authenticate token exchanges.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    /// Read the client id and secret from a store.
    ///
    /// # Errors
    ///
    /// Returns an error if either secret is missing.
    pub async fn load(store: &impl CredentialStore) -> Result<Self> {
        Ok(Self {
            client_id: store.get(CLIENT_ID, true).await?,
            client_secret: store.get(CLIENT_SECRET, true).await?,
        })
    }
}

impl core::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_credentials_load() {
        let mut store = MemoryCredentialStore::new();
        store.put(CLIENT_ID, "23ABCD", false).await.unwrap();
        store.put(CLIENT_SECRET, "s3cr3t", false).await.unwrap();

        let creds = ClientCredentials::load(&store).await.unwrap();
        assert_eq!(creds.client_id, "23ABCD");
        assert_eq!(creds.client_secret, "s3cr3t");
    }

    #[tokio::test]
    async fn test_client_credentials_missing_secret() {
        let mut store = MemoryCredentialStore::new();
        store.put(CLIENT_ID, "23ABCD", false).await.unwrap();

        let err = ClientCredentials::load(&store).await.unwrap_err();
        assert!(err.to_string().contains(CLIENT_SECRET));
    }

    #[test]
    fn test_client_credentials_debug_hides_secret() {
        let creds = ClientCredentials {
            client_id: "23ABCD".to_string(),
            client_secret: "s3cr3t".to_string(),
        };
        let debug = format!("{creds:?}");
        assert!(debug.contains("23ABCD"));
        assert!(!debug.contains("s3cr3t"));
    }
}
