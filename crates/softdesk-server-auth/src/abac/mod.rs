// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role resolution and access decisions for the project → issue → comment tree.
//!
//! ```text
//! ResourceRef ──traverse──▶ owning Project ──resolve_roles──▶ RoleSet
//!                                                                │
//!                         SubjectAttrs + ResourceAttrs + Operation
//!                                                                ▼
//!                                                    authorize ▶ Decision
//! ```

pub mod engine;
pub mod policies;
pub mod resolver;
pub mod types;

pub use engine::{authorize, is_allowed};
pub use resolver::{resolve_identity_roles, resolve_roles};
pub use types::{
	Decision, DenyReason, Operation, ResourceAttrs, ResourceKind, ResourceRef, Role, RoleSet, SubjectAttrs,
};
