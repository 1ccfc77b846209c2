//
//  bitbucket-deploy-keys
//  resource/deploy_key.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Deploy Key Lifecycle
//!
//! Declarative lifecycle for a single repository deploy key, driven entirely
//! by the remote service's authoritative state. Four operations are exposed:
//!
//! - **create**: register the key and record its composite identifier
//! - **read**: reconcile local state against the remote key
//! - **update**: replace the key record in full, then reconcile
//! - **delete**: remove the remote key
//!
//! The composite identifier `workspace/repository/key_id` is the only
//! persisted handle. A read that finds the remote key gone (HTTP 404) clears
//! the identifier and succeeds, so callers can treat "identifier empty" as
//! "needs recreating" instead of failing. Every operation is a single
//! request/response exchange with no retries.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_deploy_keys::api::BitbucketClient;
//! use bitbucket_deploy_keys::resource::{DeployKeyConfig, DeployKeyResource};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let resource = DeployKeyResource::new(BitbucketClient::cloud()?);
//!
//! let config = DeployKeyConfig {
//!     workspace: "myteam".to_string(),
//!     repository: "backend".to_string(),
//!     key: Some("ssh-ed25519 AAAAC3NzaC1... deploy@ci".to_string()),
//!     label: Some("ci-runner".to_string()),
//! };
//!
//! let mut state = resource.create(&config).await?;
//! println!("created {}", state.id);
//!
//! resource.read(&mut state).await?;
//! if !state.exists() {
//!     println!("key drifted away, recreate it");
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::{anyhow, Result};
use tracing::{debug, warn};

use crate::api::deploy_keys::{self, DeployKey, DeployKeyRequest};
use crate::api::BitbucketClient;

use super::DeployKeyId;

/// Declared configuration for a deploy key.
///
/// Mirrors the user-facing surface: `workspace` and `repository` are
/// required and immutable, `key` is optional and immutable, `label` is
/// optional and mutable.
#[derive(Debug, Clone, Default)]
pub struct DeployKeyConfig {
    /// The workspace slug (required, immutable).
    pub workspace: String,
    /// The repository slug (required, immutable).
    pub repository: String,
    /// The SSH public key material (optional, immutable).
    pub key: Option<String>,
    /// User-facing name for the key (optional, mutable).
    pub label: Option<String>,
}

/// Local state of a managed deploy key.
///
/// `id` holds the composite identifier once the key exists remotely; an
/// empty `id` means the key does not exist (never created, deleted, or
/// drifted away). `comment` and `key_id` are computed from the remote
/// record on read.
#[derive(Debug, Clone, Default)]
pub struct DeployKeyState {
    /// Composite identifier `workspace/repository/key_id`; empty when the
    /// key does not exist remotely.
    pub id: String,
    /// The workspace slug.
    pub workspace: String,
    /// The repository slug.
    pub repository: String,
    /// The configured SSH public key material, retained verbatim across
    /// reads.
    pub key: Option<String>,
    /// User-facing name for the key.
    pub label: Option<String>,
    /// Server-populated annotation, computed on read.
    pub comment: Option<String>,
    /// Server-assigned key identifier, computed on read.
    pub key_id: String,
}

impl DeployKeyState {
    /// Builds starting state from a pre-existing composite identifier.
    ///
    /// The identifier is accepted verbatim; a subsequent
    /// [`DeployKeyResource::read`] populates the remaining fields.
    ///
    /// # Parameters
    ///
    /// * `id` - A `workspace/repository/key_id` handle
    ///
    /// # Errors
    ///
    /// Fails when the identifier does not match the three-segment format.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitbucket_deploy_keys::resource::DeployKeyState;
    ///
    /// let state = DeployKeyState::import("myteam/backend/1234")?;
    /// assert_eq!(state.workspace, "myteam");
    /// assert_eq!(state.key_id, "1234");
    /// # Ok::<(), bitbucket_deploy_keys::resource::IdParseError>(())
    /// ```
    pub fn import(id: &str) -> Result<Self, super::IdParseError> {
        let parsed: DeployKeyId = id.parse()?;
        Ok(Self {
            id: id.to_string(),
            workspace: parsed.workspace,
            repository: parsed.repository,
            key_id: parsed.key_id,
            ..Default::default()
        })
    }

    /// Returns `true` while the composite identifier is set.
    ///
    /// A cleared identifier after a [`DeployKeyResource::read`] means the
    /// remote key no longer exists.
    pub fn exists(&self) -> bool {
        !self.id.is_empty()
    }

    /// Parses the composite identifier currently held in state.
    fn parsed_id(&self) -> Result<DeployKeyId, super::IdParseError> {
        self.id.parse()
    }
}

/// Performs deploy key lifecycle operations against the Bitbucket API.
///
/// Each operation is independent and non-reentrant; the resource holds no
/// mutable state of its own beyond the HTTP client.
pub struct DeployKeyResource {
    client: BitbucketClient,
}

impl DeployKeyResource {
    /// Creates a resource handle over the given API client.
    pub fn new(client: BitbucketClient) -> Self {
        Self { client }
    }

    /// Registers a new deploy key and returns its reconciled state.
    ///
    /// POSTs the key payload to the repository's deploy-keys collection,
    /// records the composite identifier from the server-assigned key ID,
    /// then delegates to [`read`](Self::read) to populate the computed
    /// fields.
    ///
    /// Serialization, network, and decode failures surface unmodified; no
    /// retry is attempted.
    pub async fn create(&self, config: &DeployKeyConfig) -> Result<DeployKeyState> {
        let request = DeployKeyRequest {
            key: config.key.clone(),
            label: config.label.clone(),
        };
        debug!("deploy key create request: {:?}", request);

        let created: DeployKey = self
            .client
            .post(
                &deploy_keys::collection_path(&config.workspace, &config.repository),
                &request,
            )
            .await?;
        debug!("deploy key create response: {:?}", created);

        let mut state = DeployKeyState {
            id: DeployKeyId::new(
                config.workspace.clone(),
                config.repository.clone(),
                created.id.to_string(),
            )
            .to_string(),
            workspace: config.workspace.clone(),
            repository: config.repository.clone(),
            key: config.key.clone(),
            label: config.label.clone(),
            ..Default::default()
        };

        self.read(&mut state).await?;
        Ok(state)
    }

    /// Reconciles local state against the remote key.
    ///
    /// Fetches the key by ID. When the remote side reports 404 the
    /// identifier is cleared and the call succeeds — the remote service is
    /// authoritative, and an absent key is drift to be repaired by a
    /// recreate, not an error. On success `label`, `comment`, and `key_id`
    /// are copied from the response; `workspace` and `repository` are echoed
    /// from the parsed identifier and the configured `key` material is
    /// retained verbatim, since the read endpoint does not return it in a
    /// comparable form.
    ///
    /// # Errors
    ///
    /// Fails on a malformed identifier or any API failure other than 404,
    /// wrapped with a message naming the identifier.
    pub async fn read(&self, state: &mut DeployKeyState) -> Result<()> {
        let id = state.parsed_id()?;

        let remote: DeployKey = match self
            .client
            .get(&deploy_keys::item_path(
                &id.workspace,
                &id.repository,
                &id.key_id,
            ))
            .await
        {
            Ok(key) => key,
            Err(e) if e.is_not_found() => {
                warn!("deploy key ({}) not found, removing from state", state.id);
                state.id.clear();
                return Ok(());
            }
            Err(e) => {
                return Err(anyhow!(e).context(format!("error reading deploy key ({})", state.id)))
            }
        };
        debug!("deploy key response: {:?}", remote);

        state.workspace = id.workspace;
        state.repository = id.repository;
        state.label = remote.label;
        state.comment = remote.comment;
        state.key_id = id.key_id;

        Ok(())
    }

    /// Replaces the remote key record and reconciles.
    ///
    /// PUTs a full key reconstruction (key material included, not a partial
    /// patch) to the per-key endpoint, then delegates to
    /// [`read`](Self::read).
    ///
    /// # Errors
    ///
    /// Fails on a malformed identifier or any API failure, wrapped with a
    /// message naming the identifier.
    pub async fn update(&self, state: &mut DeployKeyState) -> Result<()> {
        let id = state.parsed_id()?;

        let request = DeployKeyRequest {
            key: state.key.clone(),
            label: state.label.clone(),
        };
        debug!("deploy key update request: {:?}", request);

        let _updated: DeployKey = self
            .client
            .put(
                &deploy_keys::item_path(&id.workspace, &id.repository, &id.key_id),
                &request,
            )
            .await
            .map_err(|e| {
                anyhow!(e).context(format!("error updating deploy key ({})", state.id))
            })?;

        self.read(state).await
    }

    /// Removes the remote key.
    ///
    /// # Errors
    ///
    /// Fails on a malformed identifier or any API failure, wrapped with a
    /// message naming the identifier.
    pub async fn delete(&self, state: &DeployKeyState) -> Result<()> {
        let id = state.parsed_id()?;

        self.client
            .delete(&deploy_keys::item_path(
                &id.workspace,
                &id.repository,
                &id.key_id,
            ))
            .await
            .map_err(|e| {
                anyhow!(e).context(format!("error deleting deploy key ({})", state.id))
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_MATERIAL: &str = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIMockMockMock deploy@ci";

    fn config() -> DeployKeyConfig {
        DeployKeyConfig {
            workspace: "myteam".to_string(),
            repository: "backend".to_string(),
            key: Some(KEY_MATERIAL.to_string()),
            label: Some("ci-runner".to_string()),
        }
    }

    fn resource(server: &mockito::Server) -> DeployKeyResource {
        let client = BitbucketClient::cloud()
            .unwrap()
            .with_base_url(&server.url());
        DeployKeyResource::new(client)
    }

    fn key_body(id: u64, label: &str, comment: &str) -> String {
        format!(
            r#"{{"id": {}, "key": "{}", "label": "{}", "comment": "{}"}}"#,
            id, KEY_MATERIAL, label, comment
        )
    }

    #[tokio::test]
    async fn test_create_then_read_populates_computed_fields() {
        let mut server = mockito::Server::new_async().await;
        let _post = server
            .mock("POST", "/repositories/myteam/backend/deploy-keys")
            .with_status(200)
            .with_body(key_body(1234, "ci-runner", "deploy@ci"))
            .create_async()
            .await;
        let _get = server
            .mock("GET", "/repositories/myteam/backend/deploy-keys/1234")
            .with_status(200)
            .with_body(key_body(1234, "ci-runner", "deploy@ci"))
            .create_async()
            .await;

        let state = resource(&server).create(&config()).await.unwrap();

        assert_eq!(state.id, "myteam/backend/1234");
        assert_eq!(state.key_id, "1234");
        assert_eq!(state.label.as_deref(), Some("ci-runner"));
        assert_eq!(state.comment.as_deref(), Some("deploy@ci"));
        assert_eq!(state.key.as_deref(), Some(KEY_MATERIAL));
        assert!(state.exists());
    }

    #[tokio::test]
    async fn test_read_404_clears_state_without_error() {
        let mut server = mockito::Server::new_async().await;
        let _get = server
            .mock("GET", "/repositories/myteam/backend/deploy-keys/1234")
            .with_status(404)
            .with_body(r#"{"type": "error", "error": {"message": "Not found"}}"#)
            .create_async()
            .await;

        let mut state = DeployKeyState::import("myteam/backend/1234").unwrap();
        resource(&server).read(&mut state).await.unwrap();

        assert!(!state.exists());
        assert!(state.id.is_empty());
    }

    #[tokio::test]
    async fn test_read_other_error_is_wrapped_with_id() {
        let mut server = mockito::Server::new_async().await;
        let _get = server
            .mock("GET", "/repositories/myteam/backend/deploy-keys/1234")
            .with_status(500)
            .with_body(r#"{"error": {"message": "boom"}}"#)
            .create_async()
            .await;

        let mut state = DeployKeyState::import("myteam/backend/1234").unwrap();
        let err = resource(&server).read(&mut state).await.unwrap_err();

        assert!(format!("{:#}", err).contains("myteam/backend/1234"));
        // State is left untouched on hard failure.
        assert!(state.exists());
    }

    #[tokio::test]
    async fn test_read_rejects_malformed_id() {
        let server = mockito::Server::new_async().await;
        let mut state = DeployKeyState {
            id: "only/two".to_string(),
            ..Default::default()
        };

        let err = resource(&server).read(&mut state).await.unwrap_err();
        assert!(err.to_string().contains("WORKSPACE/REPOSITORY/KEY-ID"));
    }

    #[tokio::test]
    async fn test_update_label_reflected_after_read() {
        let mut server = mockito::Server::new_async().await;
        let _post = server
            .mock("POST", "/repositories/myteam/backend/deploy-keys")
            .with_status(200)
            .with_body(key_body(7, "ci-runner", "deploy@ci"))
            .create_async()
            .await;
        let _get_initial = server
            .mock("GET", "/repositories/myteam/backend/deploy-keys/7")
            .with_status(200)
            .with_body(key_body(7, "ci-runner", "deploy@ci"))
            .expect(1)
            .create_async()
            .await;

        let mut state = resource(&server).create(&config()).await.unwrap();
        assert_eq!(state.label.as_deref(), Some("ci-runner"));

        let _put = server
            .mock("PUT", "/repositories/myteam/backend/deploy-keys/7")
            .with_status(200)
            .with_body(key_body(7, "release-bot", "deploy@ci"))
            .create_async()
            .await;
        let _get_updated = server
            .mock("GET", "/repositories/myteam/backend/deploy-keys/7")
            .with_status(200)
            .with_body(key_body(7, "release-bot", "deploy@ci"))
            .create_async()
            .await;

        state.label = Some("release-bot".to_string());
        resource(&server).update(&mut state).await.unwrap();

        assert_eq!(state.label.as_deref(), Some("release-bot"));
        assert_eq!(state.id, "myteam/backend/7");
    }

    #[tokio::test]
    async fn test_delete_error_is_wrapped_with_id() {
        let mut server = mockito::Server::new_async().await;
        let _delete = server
            .mock("DELETE", "/repositories/myteam/backend/deploy-keys/1234")
            .with_status(500)
            .with_body(r#"{"error": {"message": "boom"}}"#)
            .create_async()
            .await;

        let state = DeployKeyState::import("myteam/backend/1234").unwrap();
        let err = resource(&server).delete(&state).await.unwrap_err();

        assert!(format!("{:#}", err).contains("myteam/backend/1234"));
    }

    #[tokio::test]
    async fn test_delete_succeeds_on_204() {
        let mut server = mockito::Server::new_async().await;
        let _delete = server
            .mock("DELETE", "/repositories/myteam/backend/deploy-keys/1234")
            .with_status(204)
            .create_async()
            .await;

        let state = DeployKeyState::import("myteam/backend/1234").unwrap();
        resource(&server).delete(&state).await.unwrap();
    }

    #[test]
    fn test_import_rejects_malformed_id() {
        assert!(DeployKeyState::import("a/b").is_err());
        assert!(DeployKeyState::import("").is_err());
        assert!(DeployKeyState::import("a/b/c/d").is_err());
    }

    #[test]
    fn test_import_populates_segments() {
        let state = DeployKeyState::import("myteam/backend/42").unwrap();
        assert_eq!(state.workspace, "myteam");
        assert_eq!(state.repository, "backend");
        assert_eq!(state.key_id, "42");
        assert!(state.exists());
    }
}
