//
//  bitbucket-deploy-keys
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Common API Types for the Bitbucket Cloud Client
//!
//! This module provides the shared types used by every API call made by the
//! deploy key manager: the unified [`ApiError`] taxonomy and the Cloud
//! pagination envelope [`PaginatedResponse`].
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations, mapped from
//!   HTTP status codes and Bitbucket error response bodies
//! - [`PaginatedResponse`] - Bitbucket Cloud's `values`/`next` list envelope
//!
//! # Example
//!
//! ```rust
//! use bitbucket_deploy_keys::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::AuthRequired) => println!("Please authenticate first"),
//!         Err(ApiError::NotFound(resource)) => println!("Not found: {}", resource),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Bitbucket API operations.
///
/// `ApiError` provides a comprehensive set of error variants covering common
/// failure scenarios when interacting with the Bitbucket Cloud API. It
/// implements the standard `Error` trait via `thiserror` for ergonomic error
/// handling and propagation with `?`.
///
/// # Variants
///
/// | Variant | Description | HTTP Status |
/// |---------|-------------|-------------|
/// | `AuthRequired` | Missing or rejected credentials | 401 |
/// | `Forbidden` | Insufficient permissions | 403 |
/// | `NotFound` | Requested resource does not exist | 404 |
/// | `RateLimited` | Too many requests, retry later | 429 |
/// | `BadRequest` | Invalid request parameters | 400 |
/// | `ServerError` | Internal server error | 5xx |
/// | `Network` | Network connectivity issues | N/A |
/// | `Unknown` | Unexpected or unclassified errors | N/A |
///
/// # Notes
///
/// - The `Network` variant automatically converts from `reqwest::Error`
/// - The `NotFound` variant is load-bearing for the resource layer: a read
///   that observes it treats the remote key as drifted away rather than as
///   a failure
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication credentials are missing or were rejected (HTTP 401).
    #[error("Authentication required")]
    AuthRequired,

    /// Access to the resource is forbidden (HTTP 403).
    ///
    /// The authenticated user does not have sufficient permissions to
    /// perform the requested operation on the repository.
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// The requested resource was not found (HTTP 404).
    ///
    /// The repository or deploy key does not exist, or the authenticated
    /// user cannot see it.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API rate limit has been exceeded (HTTP 429).
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The request was malformed or contained invalid parameters (HTTP 400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error occurred on the Bitbucket side (HTTP 5xx).
    #[error("Server error: {0}")]
    ServerError(String),

    /// A network-level error occurred during the request.
    ///
    /// Covers connection failures, timeouts, DNS resolution errors, and
    /// JSON decode failures from the transport layer.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An unknown or unexpected error occurred.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Maps a non-success HTTP response to an [`ApiError`] variant.
    ///
    /// The human-readable message is extracted from the Bitbucket Cloud
    /// error body where possible (see [`extract_error_message`]); otherwise
    /// the raw body is carried along with the status code.
    ///
    /// # Parameters
    ///
    /// * `status` - The HTTP status code of the response
    /// * `body` - The raw response body
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = extract_error_message(body)
            .unwrap_or_else(|| format!("API error ({}): {}", status, body));

        match status {
            StatusCode::UNAUTHORIZED => Self::AuthRequired,
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            StatusCode::BAD_REQUEST => Self::BadRequest(message),
            s if s.is_server_error() => Self::ServerError(message),
            _ => Self::Unknown(message),
        }
    }

    /// Returns `true` if this error is the 404 "resource gone" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Extracts a user-friendly message from a Bitbucket Cloud error response.
///
/// Bitbucket Cloud returns errors in the format:
/// ```json
/// {"type": "error", "error": {"message": "Human readable message"}}
/// ```
///
/// Some endpoints use `{"error": {"detail": "..."}}` or a bare
/// `{"message": "..."}` instead. This function attempts each shape in turn
/// and returns `None` if the body is not parseable JSON or carries no
/// recognizable message.
///
/// # Parameters
///
/// * `body` - The raw error response body
pub fn extract_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;

    // Standard Cloud format: {"type": "error", "error": {"message": "..."}}
    if let Some(message) = json
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    {
        return Some(message.to_string());
    }

    // Alternative Cloud format: {"error": {"detail": "..."}}
    if let Some(detail) = json
        .get("error")
        .and_then(|e| e.get("detail"))
        .and_then(|m| m.as_str())
    {
        return Some(detail.to_string());
    }

    // Simple message format: {"message": "..."}
    json.get("message")
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
}

/// Bitbucket Cloud's paginated list envelope.
///
/// Cloud list endpoints wrap their results in a standard envelope carrying
/// the page contents in `values`, the page geometry, and an absolute URL for
/// the next page when more results exist.
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `values` | The items on this page |
/// | `page` | 1-based page number |
/// | `pagelen` | Page size requested/served |
/// | `size` | Total number of items, when the backend reports it |
/// | `next` | Absolute URL of the next page, absent on the last page |
///
/// # Example
///
/// ```rust
/// use bitbucket_deploy_keys::api::common::PaginatedResponse;
///
/// let json = r#"{"values": [1, 2, 3], "page": 1, "pagelen": 10}"#;
/// let page: PaginatedResponse<u32> = serde_json::from_str(json).unwrap();
/// assert_eq!(page.values.len(), 3);
/// assert!(!page.has_next());
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The items on this page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// 1-based page number.
    #[serde(default)]
    pub page: Option<u32>,

    /// Page size.
    #[serde(default)]
    pub pagelen: Option<u32>,

    /// Total number of items across all pages, when reported.
    #[serde(default)]
    pub size: Option<u32>,

    /// Absolute URL of the next page; `None` on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> PaginatedResponse<T> {
    /// Returns `true` if a further page of results exists.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns the URL of the next page, if any.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cloud_error_message() {
        let body = r#"{"type": "error", "error": {"message": "Repository not found"}}"#;
        assert_eq!(
            extract_error_message(body),
            Some("Repository not found".to_string())
        );
    }

    #[test]
    fn test_extract_detail_message() {
        let body = r#"{"error": {"detail": "Key already exists"}}"#;
        assert_eq!(
            extract_error_message(body),
            Some("Key already exists".to_string())
        );
    }

    #[test]
    fn test_extract_simple_message() {
        let body = r#"{"message": "Something went wrong"}"#;
        assert_eq!(
            extract_error_message(body),
            Some("Something went wrong".to_string())
        );
    }

    #[test]
    fn test_extract_unparseable_body() {
        assert_eq!(extract_error_message("<html>502</html>"), None);
        assert_eq!(extract_error_message(""), None);
    }

    #[test]
    fn test_status_mapping() {
        let err = ApiError::from_response(StatusCode::NOT_FOUND, "{}");
        assert!(err.is_not_found());

        assert!(matches!(
            ApiError::from_response(StatusCode::UNAUTHORIZED, ""),
            ApiError::AuthRequired
        ));
        assert!(matches!(
            ApiError::from_response(StatusCode::FORBIDDEN, ""),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from_response(StatusCode::TOO_MANY_REQUESTS, ""),
            ApiError::RateLimited
        ));
        assert!(matches!(
            ApiError::from_response(StatusCode::BAD_GATEWAY, ""),
            ApiError::ServerError(_)
        ));
        assert!(matches!(
            ApiError::from_response(StatusCode::BAD_REQUEST, ""),
            ApiError::BadRequest(_)
        ));
    }

    #[test]
    fn test_paginated_response_defaults() {
        let page: PaginatedResponse<String> = serde_json::from_str("{}").unwrap();
        assert!(page.values.is_empty());
        assert!(!page.has_next());
        assert_eq!(page.next_url(), None);
    }

    #[test]
    fn test_paginated_response_next() {
        let json = r#"{"values": [], "next": "https://api.bitbucket.org/2.0/x?page=2"}"#;
        let page: PaginatedResponse<String> = serde_json::from_str(json).unwrap();
        assert!(page.has_next());
        assert_eq!(
            page.next_url(),
            Some("https://api.bitbucket.org/2.0/x?page=2")
        );
    }
}
