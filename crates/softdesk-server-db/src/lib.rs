// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! # softdesk-server-db
//!
//! Persistence layer for the SoftDesk server using SQLite via sqlx.
//!
//! ## Repository Pattern
//!
//! Each domain has two components:
//! - **`*Store` trait**: the interface services depend on (e.g. `ProjectStore`)
//! - **`*Repository` struct**: the implementation holding a `SqlitePool`
//!
//! Trait impls delegate to inherent methods so callers holding a concrete
//! repository do not need the trait in scope.
//!
//! ## Error Handling
//!
//! | Variant | When to use |
//! |---------|-------------|
//! | `NotFound` | An id the caller expects to exist is missing (update, reassignment) |
//! | `Conflict` | Unique constraint violation (username, contributor edge) |
//! | `Configuration` | No admin account to inherit a deleted user's projects |
//! | `Sqlx` | Unexpected database errors, propagated with `?` |
//! | `Internal` | Invalid stored data (e.g. an unparseable UUID) |
//!
//! Lookups where absence is normal return `Result<Option<T>>`; deletes return
//! `Result<bool>`.
//!
//! ## Transactions
//!
//! Multi-row mutations run in one transaction:
//! - [`ProjectRepository::delete_project_cascade`] removes comments, issues,
//!   contributors and the project
//! - [`UserRepository::reassign_and_delete_user`] hands over everything a
//!   user owns or authored before removing the account
//!
//! ## Testing
//!
//! Tests run against an in-memory pool with the real migrations applied
//! (`testing::create_test_pool`), plus small insert helpers for fixtures.

pub mod comment;
mod convert;
pub mod error;
pub mod issue;
pub mod migrations;
pub mod pool;
pub mod project;
pub mod reassignment;
pub mod session;
pub mod user;

#[cfg(test)]
pub mod testing;

pub use comment::{CommentRepository, CommentStore};
pub use error::{DbError, Result};
pub use issue::{IssueRepository, IssueStore, IssueTitle};
pub use migrations::run_migrations;
pub use pool::create_pool;
pub use project::{ContributorWithUser, ProjectCascade, ProjectRepository, ProjectStore};
pub use session::{SessionRepository, SessionStore};
pub use user::{UserRepository, UserStore};
