//
//  bitbucket-deploy-keys
//  api/deploy_keys.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Deploy key API types and endpoint paths.
//!
//! Deploy keys are SSH public keys registered against a single repository,
//! granting read access over SSH without a full user account. Bitbucket
//! Cloud exposes them under
//! `/repositories/{workspace}/{repo_slug}/deploy-keys`.
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_deploy_keys::api::deploy_keys::{self, DeployKey, DeployKeyRequest};
//! use bitbucket_deploy_keys::api::BitbucketClient;
//!
//! # async fn example() -> Result<(), bitbucket_deploy_keys::api::ApiError> {
//! let client = BitbucketClient::cloud()?;
//! let request = DeployKeyRequest {
//!     key: Some("ssh-ed25519 AAAAC3NzaC1... deploy@ci".to_string()),
//!     label: Some("ci-runner".to_string()),
//! };
//! let created: DeployKey = client
//!     .post(&deploy_keys::collection_path("myteam", "backend"), &request)
//!     .await?;
//! println!("created key {}", created.id);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A deploy key as returned by the Bitbucket Cloud API.
///
/// # Fields
///
/// * `id` - Server-assigned numeric identifier, unique per repository
/// * `key` - The SSH public key material
/// * `label` - User-facing name for the key
/// * `comment` - Server-populated annotation, usually the trailing comment
///   of the submitted key material
/// * `created_on` - When the key was registered
/// * `last_used` - When the key last authenticated, if ever
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployKey {
    /// Server-assigned numeric identifier.
    pub id: u64,

    /// The SSH public key material.
    #[serde(default)]
    pub key: Option<String>,

    /// User-facing name for the key.
    #[serde(default)]
    pub label: Option<String>,

    /// Server-populated annotation derived from the key material.
    #[serde(default)]
    pub comment: Option<String>,

    /// ISO 8601 timestamp of registration.
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,

    /// ISO 8601 timestamp of last authentication, if ever used.
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
}

/// Request payload for creating or replacing a deploy key.
///
/// The same shape serves both POST (create) and PUT (update). Update is a
/// full replacement, not a partial patch: the endpoint expects the complete
/// key reconstruction including key material.
///
/// # Example
///
/// ```rust
/// use bitbucket_deploy_keys::api::deploy_keys::DeployKeyRequest;
///
/// let request = DeployKeyRequest {
///     key: Some("ssh-rsa AAAAB3NzaC1... build@agent".to_string()),
///     label: Some("build-agent".to_string()),
/// };
///
/// let json = serde_json::to_value(&request).unwrap();
/// assert!(json.get("key").is_some());
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeployKeyRequest {
    /// The SSH public key material. Absent fields are omitted from the
    /// serialized body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// User-facing name for the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Returns the collection path for a repository's deploy keys.
///
/// # Parameters
///
/// * `workspace` - The workspace slug
/// * `repository` - The repository slug
pub fn collection_path(workspace: &str, repository: &str) -> String {
    format!("/repositories/{}/{}/deploy-keys", workspace, repository)
}

/// Returns the path of a single deploy key within a repository.
///
/// # Parameters
///
/// * `workspace` - The workspace slug
/// * `repository` - The repository slug
/// * `key_id` - The server-assigned key identifier
pub fn item_path(workspace: &str, repository: &str, key_id: &str) -> String {
    format!(
        "/repositories/{}/{}/deploy-keys/{}",
        workspace, repository, key_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(
            collection_path("myteam", "backend"),
            "/repositories/myteam/backend/deploy-keys"
        );
        assert_eq!(
            item_path("myteam", "backend", "1234"),
            "/repositories/myteam/backend/deploy-keys/1234"
        );
    }

    #[test]
    fn test_request_omits_absent_fields() {
        let request = DeployKeyRequest {
            key: None,
            label: Some("ci".to_string()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("key").is_none());
        assert_eq!(json["label"], "ci");
    }

    #[test]
    fn test_deploy_key_deserializes_sparse_response() {
        // The read endpoint may omit everything but the id.
        let key: DeployKey = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(key.id, 42);
        assert!(key.label.is_none());
        assert!(key.comment.is_none());
        assert!(key.created_on.is_none());
    }

    #[test]
    fn test_deploy_key_deserializes_full_response() {
        let body = r#"{
            "id": 1234,
            "key": "ssh-ed25519 AAAAC3NzaC1 deploy@ci",
            "label": "ci-runner",
            "comment": "deploy@ci",
            "created_on": "2026-01-15T09:30:00.000000+00:00",
            "last_used": null
        }"#;
        let key: DeployKey = serde_json::from_str(body).unwrap();
        assert_eq!(key.id, 1234);
        assert_eq!(key.label.as_deref(), Some("ci-runner"));
        assert_eq!(key.comment.as_deref(), Some("deploy@ci"));
        assert!(key.created_on.is_some());
        assert!(key.last_used.is_none());
    }
}
