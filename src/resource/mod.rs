//
//  bitbucket-deploy-keys
//  resource/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Deploy Key Resource Layer
//!
//! Declarative lifecycle management for repository deploy keys, addressed by
//! the composite identifier `workspace/repository/key_id`.
//!
//! - [`DeployKeyId`]: the parsed composite identifier (three-segment rule)
//! - [`DeployKeyConfig`]: the declared configuration surface
//! - [`DeployKeyState`]: local state, including import from a raw identifier
//! - [`DeployKeyResource`]: create / read / update / delete against the API
//!
//! The identifier format and the "404 on read clears state" convention are
//! stable contracts; callers rely on both.

mod deploy_key;
mod id;

pub use deploy_key::{DeployKeyConfig, DeployKeyResource, DeployKeyState};
pub use id::{DeployKeyId, IdParseError};
