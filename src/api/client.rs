//
//  bitbucket-deploy-keys
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Bitbucket Cloud API
//!
//! This module provides the core HTTP client used by every deploy key
//! operation. It handles authentication header injection, JSON
//! serialization/deserialization, and status-code-to-error mapping.
//!
//! ## Features
//!
//! - Bitbucket Cloud API v2.0 base URL, overridable for tests
//! - Authentication header injection ([`AuthCredential`])
//! - JSON request/response handling
//! - Typed errors via [`ApiError`]
//! - Custom User-Agent header

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::common::ApiError;
use crate::auth::AuthCredential;

/// Base URL of the Bitbucket Cloud REST API v2.0.
pub const CLOUD_API_ROOT: &str = "https://api.bitbucket.org/2.0";

/// The HTTP client for interacting with the Bitbucket Cloud API.
///
/// This client handles all HTTP communication for the deploy key manager:
/// - Building request URLs against the configured base URL
/// - Applying authentication headers
/// - Serializing request bodies and deserializing responses
/// - Mapping non-success status codes to [`ApiError`] variants
///
/// # Creating a Client
///
/// ```rust,no_run
/// use bitbucket_deploy_keys::api::BitbucketClient;
/// use bitbucket_deploy_keys::auth::AuthCredential;
///
/// let client = BitbucketClient::cloud()?
///     .with_auth(AuthCredential::access_token("your-token"));
/// # Ok::<(), bitbucket_deploy_keys::api::ApiError>(())
/// ```
///
/// # Testing
///
/// The base URL can be pointed at a local mock server:
///
/// ```rust,no_run
/// use bitbucket_deploy_keys::api::BitbucketClient;
///
/// let client = BitbucketClient::cloud()?.with_base_url("http://127.0.0.1:8080");
/// # Ok::<(), bitbucket_deploy_keys::api::ApiError>(())
/// ```
pub struct BitbucketClient {
    /// The underlying HTTP client
    http: Client,
    /// Base URL all request paths are appended to (no trailing slash)
    base_url: String,
    /// Optional authentication credentials
    auth: Option<AuthCredential>,
}

impl BitbucketClient {
    /// Creates a new client configured for Bitbucket Cloud.
    ///
    /// The client targets the Bitbucket Cloud API at
    /// `https://api.bitbucket.org/2.0`.
    ///
    /// # Returns
    ///
    /// Returns `Ok(BitbucketClient)` on success, or an error if the HTTP
    /// client could not be created.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bitbucket_deploy_keys::api::BitbucketClient;
    ///
    /// let client = BitbucketClient::cloud()?;
    /// assert_eq!(client.base_url(), "https://api.bitbucket.org/2.0");
    /// # Ok::<(), bitbucket_deploy_keys::api::ApiError>(())
    /// ```
    pub fn cloud() -> Result<Self, ApiError> {
        Ok(Self {
            http: Client::builder()
                .user_agent(format!("bbdk/{}", crate::VERSION))
                .build()?,
            base_url: CLOUD_API_ROOT.to_string(),
            auth: None,
        })
    }

    /// Overrides the base URL for API requests.
    ///
    /// Used by tests to point the client at a mock server, and honored by the
    /// CLI when the `BITBUCKET_API_URL` environment variable is set. A
    /// trailing slash is stripped so paths can always start with `/`.
    ///
    /// # Parameters
    ///
    /// * `url` - The replacement base URL
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the authentication credentials for this client.
    ///
    /// This method uses the builder pattern and returns `self` for chaining.
    ///
    /// # Parameters
    ///
    /// * `auth` - The authentication credentials to use for requests
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Returns the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Applies the configured credentials to a request, if any.
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(auth) => auth.apply_to_request(request),
            None => request,
        }
    }

    /// Makes an HTTP GET request to the specified path.
    ///
    /// The path is appended to the base URL. Authentication headers are
    /// automatically added if credentials were configured.
    ///
    /// # Type Parameters
    ///
    /// * `T` - The type to deserialize the response JSON into
    ///
    /// # Parameters
    ///
    /// * `path` - The API path (e.g., "/repositories/workspace/repo/deploy-keys")
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The network request fails
    /// - The response status is not successful (2xx)
    /// - The response body cannot be deserialized to type `T`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);
        let request = self.authenticate(self.http.get(&url));

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, &text));
        }

        Ok(response.json().await?)
    }

    /// Makes an HTTP POST request to the specified path with a JSON body.
    ///
    /// # Type Parameters
    ///
    /// * `T` - The type to deserialize the response JSON into
    /// * `B` - The type of the request body (must implement `Serialize`)
    ///
    /// # Parameters
    ///
    /// * `path` - The API path
    /// * `body` - The request body to serialize as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request body cannot be serialized
    /// - The network request fails
    /// - The response status is not successful (2xx)
    /// - The response body cannot be deserialized to type `T`
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);
        let request = self.authenticate(self.http.post(&url).json(body));

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, &text));
        }

        Ok(response.json().await?)
    }

    /// Makes an HTTP PUT request to the specified path with a JSON body.
    ///
    /// # Type Parameters
    ///
    /// * `T` - The type to deserialize the response JSON into
    /// * `B` - The type of the request body (must implement `Serialize`)
    ///
    /// # Parameters
    ///
    /// * `path` - The API path
    /// * `body` - The request body to serialize as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request body cannot be serialized
    /// - The network request fails
    /// - The response status is not successful (2xx)
    /// - The response body cannot be deserialized to type `T`
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("PUT {}", url);
        let request = self.authenticate(self.http.put(&url).json(body));

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, &text));
        }

        Ok(response.json().await?)
    }

    /// Makes an HTTP DELETE request to the specified path.
    ///
    /// # Parameters
    ///
    /// * `path` - The API path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The network request fails
    /// - The response status is not successful (2xx)
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("DELETE {}", url);
        let request = self.authenticate(self.http.delete(&url));

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, &text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Echo {
        value: String,
    }

    #[tokio::test]
    async fn test_get_deserializes_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/echo")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"value": "hello"}"#)
            .create_async()
            .await;

        let client = BitbucketClient::cloud()
            .unwrap()
            .with_base_url(&server.url());
        let echo: Echo = client.get("/echo").await.unwrap();
        assert_eq!(echo.value, "hello");
    }

    #[tokio::test]
    async fn test_get_maps_404_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body(r#"{"type": "error", "error": {"message": "gone"}}"#)
            .create_async()
            .await;

        let client = BitbucketClient::cloud()
            .unwrap()
            .with_base_url(&server.url());
        let err = client.get::<Echo>("/missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("gone"));
    }

    #[tokio::test]
    async fn test_get_maps_401_to_auth_required() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/private")
            .with_status(401)
            .with_body("")
            .create_async()
            .await;

        let client = BitbucketClient::cloud()
            .unwrap()
            .with_base_url(&server.url());
        let err = client.get::<Echo>("/private").await.unwrap_err();
        assert!(matches!(err, ApiError::AuthRequired));
    }

    #[tokio::test]
    async fn test_delete_succeeds_on_204() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/thing/1")
            .with_status(204)
            .create_async()
            .await;

        let client = BitbucketClient::cloud()
            .unwrap()
            .with_base_url(&server.url());
        client.delete("/thing/1").await.unwrap();
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = BitbucketClient::cloud()
            .unwrap()
            .with_base_url("http://localhost:9999/");
        assert_eq!(client.base_url(), "http://localhost:9999");
    }
}
