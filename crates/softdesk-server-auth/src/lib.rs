// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity, domain entities and access control for the SoftDesk tracker.
//!
//! This crate is pure: it performs no I/O. Persistence lives in
//! `softdesk-server-db` and the HTTP surface in `softdesk-server`.
//!
//! - [`types`]: ID newtypes and the closed choice enums
//! - [`user`], [`project`], [`issue`], [`comment`], [`session`]: entities
//! - [`password`]: Argon2 hashing
//! - [`middleware`]: [`AuthContext`] and bearer token extraction
//! - [`abac`]: role resolution and the access policy engine
//! - [`account_deletion`]: reassignment rules for deleted accounts

pub mod abac;
pub mod account_deletion;
pub mod comment;
pub mod fields;
pub mod issue;
pub mod middleware;
pub mod password;
pub mod project;
pub mod session;
pub mod types;
pub mod user;

pub use abac::{
	authorize, resolve_identity_roles, resolve_roles, Decision, DenyReason, Operation, ResourceAttrs,
	ResourceKind, ResourceRef, Role, RoleSet, SubjectAttrs,
};
pub use account_deletion::{
	plan_edge_transfer, select_fallback_admin, EdgeTransfer, FallbackCandidate, ReassignmentSummary,
};
pub use comment::Comment;
pub use fields::FieldError;
pub use issue::Issue;
pub use middleware::{extract_bearer_token, AuthContext, AuthRequired, CurrentUser};
pub use password::{hash_password, verify_password, PasswordError};
pub use project::{Contributor, Project};
pub use session::{generate_session_token, hash_token, Session};
pub use types::{
	CommentId, ContributorId, IssueId, IssuePriority, IssueStatus, IssueTag, ParseChoiceError, ProjectId,
	ProjectType, SessionId, UserId,
};
pub use user::{User, UserProfile, UserValidationError};
