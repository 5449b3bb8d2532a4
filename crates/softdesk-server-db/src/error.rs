// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Repository errors. Services translate these into HTTP-facing outcomes.

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("sqlite: {0}")]
	Sqlx(#[from] sqlx::Error),

	/// The named row does not exist, e.g. `"project"` or `"user"`.
	#[error("{0} not found")]
	NotFound(String),

	/// A uniqueness rule rejected the write: a taken username or a duplicate
	/// contributor row.
	#[error("conflict: {0}")]
	Conflict(String),

	/// A stored value or the connection string could not be parsed.
	#[error("internal: {0}")]
	Internal(String),

	/// The deployment is missing something an operation requires, e.g. an
	/// admin account to inherit a deleted user's projects.
	#[error("configuration error: {0}")]
	Configuration(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Map a unique-constraint violation to [`DbError::Conflict`].
pub(crate) fn conflict_on_unique(e: sqlx::Error, message: &str) -> DbError {
	match e {
		sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
			DbError::Conflict(message.to_string())
		}
		_ => DbError::Sqlx(e),
	}
}
