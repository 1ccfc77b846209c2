//
//  bitbucket-deploy-keys
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! This module provides credential handling for the deploy key manager.
//! Two authentication methods are supported, matching what Bitbucket Cloud
//! accepts on the deploy key endpoints:
//!
//! - **Access token**: API token or repository/workspace access token sent
//!   as a Bearer header. Stored in the system keyring by `bbdk auth login`.
//! - **App password**: Username plus app password sent as HTTP Basic auth.
//!   Supplied through the `BITBUCKET_USERNAME`/`BITBUCKET_PASSWORD`
//!   environment variables, the convention shared with other Bitbucket
//!   automation tooling.
//!
//! ## Resolution order
//!
//! [`resolve_credential`] checks, in order:
//!
//! 1. `BITBUCKET_USERNAME` + `BITBUCKET_PASSWORD` (app password)
//! 2. `BITBUCKET_TOKEN` (access token)
//! 3. The system keyring entry written by `bbdk auth login`
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_deploy_keys::auth::AuthCredential;
//!
//! let credential = AuthCredential::access_token("your-token");
//! ```

mod keyring;

pub use keyring::KeyringStore;

use anyhow::Result;
use reqwest::RequestBuilder;

/// The keyring entry name credentials are stored under.
///
/// Deploy keys are a Bitbucket Cloud surface, so a single well-known host
/// entry is sufficient.
pub const CLOUD_HOST: &str = "bitbucket.org";

/// Authentication credentials accepted by the Bitbucket Cloud API.
///
/// # Variants
///
/// - `AccessToken`: Bearer token authentication (API tokens, repository and
///   workspace access tokens).
/// - `AppPassword`: Username and app password sent as HTTP Basic auth.
///
/// # Example
///
/// ```rust
/// use bitbucket_deploy_keys::auth::AuthCredential;
///
/// let token_cred = AuthCredential::access_token("eyJhbGciOiJIUzI1NiIs...");
/// let basic_cred = AuthCredential::AppPassword {
///     username: "ngoni".to_string(),
///     password: "app-password-here".to_string(),
/// };
/// ```
#[derive(Debug, Clone)]
pub enum AuthCredential {
    /// Bearer token authentication.
    AccessToken {
        /// The token value sent in the `Authorization: Bearer` header.
        token: String,
    },

    /// Username and app password sent as HTTP Basic auth.
    AppPassword {
        /// The Bitbucket username.
        username: String,
        /// The app password generated from Bitbucket settings.
        password: String,
    },
}

impl AuthCredential {
    /// Creates a Bearer-token credential.
    ///
    /// # Parameters
    ///
    /// * `token` - The access token value
    pub fn access_token(token: impl Into<String>) -> Self {
        Self::AccessToken {
            token: token.into(),
        }
    }

    /// Applies this credential to an outgoing request.
    ///
    /// # Parameters
    ///
    /// * `request` - The request builder to attach authentication to
    ///
    /// # Returns
    ///
    /// The request builder with the appropriate `Authorization` header set.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::AccessToken { token } => request.bearer_auth(token),
            Self::AppPassword { username, password } => {
                request.basic_auth(username, Some(password))
            }
        }
    }
}

/// Resolves the credential to use for API calls.
///
/// Environment variables win over the keyring so that CI jobs and scripts
/// can override an interactive login without touching stored state.
///
/// # Returns
///
/// Returns `Ok(Some(credential))` when a usable credential was found,
/// `Ok(None)` when nothing is configured, and `Err` only for keyring access
/// failures.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_deploy_keys::auth::resolve_credential;
///
/// match resolve_credential()? {
///     Some(_) => println!("authenticated"),
///     None => println!("run 'bbdk auth login' first"),
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn resolve_credential() -> Result<Option<AuthCredential>> {
    if let (Ok(username), Ok(password)) = (
        std::env::var("BITBUCKET_USERNAME"),
        std::env::var("BITBUCKET_PASSWORD"),
    ) {
        if !username.is_empty() && !password.is_empty() {
            return Ok(Some(AuthCredential::AppPassword { username, password }));
        }
    }

    if let Ok(token) = std::env::var("BITBUCKET_TOKEN") {
        if !token.is_empty() {
            return Ok(Some(AuthCredential::access_token(token)));
        }
    }

    let store = KeyringStore::new();
    Ok(store.get(CLOUD_HOST)?.map(AuthCredential::access_token))
}

/// Validates the format of a token string.
///
/// Performs basic validation only: the token must be non-empty and contain
/// no whitespace. This does NOT verify the token against the server; use a
/// probe request against `/user` for that.
///
/// # Example
///
/// ```rust
/// use bitbucket_deploy_keys::auth::validate_token;
///
/// assert!(validate_token("NjM0NTY3ODkwMTIzNDU2Nzg5MA=="));
/// assert!(!validate_token(""));
/// assert!(!validate_token("has space"));
/// ```
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_token() {
        assert!(validate_token("abc123"));
        assert!(validate_token("NjM0NTY3ODkw=="));
        assert!(!validate_token(""));
        assert!(!validate_token("has space"));
        assert!(!validate_token("has\ttab"));
        assert!(!validate_token("has\nnewline"));
    }

    #[test]
    fn test_access_token_constructor() {
        let cred = AuthCredential::access_token("tok");
        assert!(matches!(cred, AuthCredential::AccessToken { token } if token == "tok"));
    }
}
