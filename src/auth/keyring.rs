//
//  bitbucket-deploy-keys
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Secure Credential Storage
//!
//! Stores access tokens in the operating system's native credential store:
//!
//! - **macOS**: Keychain
//! - **Windows**: Credential Manager
//! - **Linux**: Secret Service (GNOME Keyring, KWallet)
//!
//! Tokens are encrypted at rest by the platform and never written to the
//! configuration file.

use anyhow::Result;
use keyring::Entry;

/// Service name identifying this application in the keyring.
const SERVICE_NAME: &str = "bitbucket-deploy-keys";

/// Credential store backed by the system keyring.
///
/// Entries are keyed by host, so a future multi-host setup can reuse the
/// same store without migration.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_deploy_keys::auth::KeyringStore;
///
/// let store = KeyringStore::new();
/// store.store("bitbucket.org", "access-token")?;
///
/// if let Some(token) = store.get("bitbucket.org")? {
///     println!("found a stored token ({} characters)", token.len());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Notes
///
/// - The keyring may require user interaction (password, biometrics) on
///   first access.
/// - On Linux, a secret service daemon must be running.
pub struct KeyringStore {
    /// The service name identifying this application in the keyring.
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    /// Creates a new keyring store with the default service name.
    ///
    /// No keyring access occurs during construction; the keyring is touched
    /// only when methods are called.
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Stores a credential in the system keyring.
    ///
    /// Creates or updates the keyring entry for the specified host. An
    /// existing entry for the same host is silently replaced.
    ///
    /// # Parameters
    ///
    /// - `host`: The Bitbucket host used as the entry identifier.
    /// - `credential`: The credential string to store.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the keyring service is unavailable or access is
    /// denied.
    pub fn store(&self, host: &str, credential: &str) -> Result<()> {
        let entry = Entry::new(&self.service, host)?;
        entry.set_password(credential)?;
        Ok(())
    }

    /// Retrieves a credential from the system keyring.
    ///
    /// # Parameters
    ///
    /// - `host`: The Bitbucket host used as the entry identifier.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(credential))` if found, `Ok(None)` if no entry
    /// exists for the host, and `Err` for keyring access errors.
    pub fn get(&self, host: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, host)?;
        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes a credential from the system keyring.
    ///
    /// Idempotent: deleting a non-existent entry succeeds.
    ///
    /// # Parameters
    ///
    /// - `host`: The Bitbucket host identifying the entry to delete.
    pub fn delete(&self, host: &str) -> Result<()> {
        let entry = Entry::new(&self.service, host)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(e.into()),
        }
    }
}
