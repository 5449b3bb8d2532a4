// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resource services.
//!
//! Every operation follows the same order:
//!
//! 1. Resolve the parent chain ([`AccessResolver::resolve`]); a missing
//!    parent is `NotFound`.
//! 2. Ask the policy engine for the intended [`Operation`]; a denial is
//!    `NotAuthenticated` or `Forbidden`.
//! 3. Load the child, if any; a missing child (or one filed under a
//!    different parent) is `NotFound`.
//! 4. Validate the payload and mutate.
//!
//! Services hold their stores as trait objects and know nothing about HTTP.
//!
//! [`Operation`]: softdesk_server_auth::Operation

pub mod access;
pub mod comment;
pub mod contributor;
pub mod error;
pub mod issue;
pub mod project;
pub mod session;
pub mod user;

#[cfg(test)]
pub mod testing;

pub use access::{AccessResolver, Scope};
pub use comment::CommentService;
pub use contributor::ContributorService;
pub use error::ServiceError;
pub use issue::{IssueDetail, IssueService};
pub use project::{ProjectDetail, ProjectService};
pub use session::{IssuedToken, SessionService};
pub use user::UserService;
