//
//  bitbucket-deploy-keys
//  resource/id.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Composite Deploy Key Identifier
//!
//! A deploy key is addressed by a single opaque handle of the form
//! `workspace/repository/key_id`. The handle is the only persisted link
//! between locally declared state and the remote key, so its format must
//! stay stable: exactly three slash-delimited non-empty segments.
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_deploy_keys::resource::DeployKeyId;
//!
//! let id: DeployKeyId = "myteam/backend/1234".parse()?;
//! assert_eq!(id.workspace, "myteam");
//! assert_eq!(id.repository, "backend");
//! assert_eq!(id.key_id, "1234");
//! assert_eq!(id.to_string(), "myteam/backend/1234");
//! # Ok::<(), bitbucket_deploy_keys::resource::IdParseError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a composite identifier does not match the expected
/// `WORKSPACE/REPOSITORY/KEY-ID` shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unexpected format of deploy key ID ({0:?}), expected WORKSPACE/REPOSITORY/KEY-ID")]
pub struct IdParseError(pub String);

/// The parsed form of a composite deploy key identifier.
///
/// # Invariant
///
/// All three segments are non-empty and contain no `/`. [`FromStr`] rejects
/// anything else, and [`fmt::Display`] round-trips the original string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployKeyId {
    /// The workspace slug.
    pub workspace: String,
    /// The repository slug.
    pub repository: String,
    /// The server-assigned key identifier.
    pub key_id: String,
}

impl DeployKeyId {
    /// Builds a composite identifier from its parts.
    ///
    /// # Parameters
    ///
    /// * `workspace` - The workspace slug
    /// * `repository` - The repository slug
    /// * `key_id` - The server-assigned key identifier
    pub fn new(
        workspace: impl Into<String>,
        repository: impl Into<String>,
        key_id: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repository: repository.into(),
            key_id: key_id.into(),
        }
    }
}

impl FromStr for DeployKeyId {
    type Err = IdParseError;

    /// Parses a `workspace/repository/key_id` handle.
    ///
    /// # Errors
    ///
    /// Fails with [`IdParseError`] when the input does not contain exactly
    /// three non-empty slash-delimited segments.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();

        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(IdParseError(s.to_string()));
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl fmt::Display for DeployKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.workspace, self.repository, self.key_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        let id: DeployKeyId = "myteam/backend/1234".parse().unwrap();
        assert_eq!(id.workspace, "myteam");
        assert_eq!(id.repository, "backend");
        assert_eq!(id.key_id, "1234");
    }

    #[test]
    fn test_parse_rejects_wrong_segment_count() {
        assert!("a/b".parse::<DeployKeyId>().is_err());
        assert!("a/b/c/d".parse::<DeployKeyId>().is_err());
        assert!("".parse::<DeployKeyId>().is_err());
        assert!("abc".parse::<DeployKeyId>().is_err());
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!("a//c".parse::<DeployKeyId>().is_err());
        assert!("/b/c".parse::<DeployKeyId>().is_err());
        assert!("a/b/".parse::<DeployKeyId>().is_err());
    }

    #[test]
    fn test_error_names_expected_format() {
        let err = "a/b".parse::<DeployKeyId>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("a/b"));
        assert!(message.contains("WORKSPACE/REPOSITORY/KEY-ID"));
    }

    #[test]
    fn test_display_round_trips() {
        let raw = "myteam/backend/1234";
        let id: DeployKeyId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }
}
