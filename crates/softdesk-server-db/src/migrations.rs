// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Embedded schema migrations.
//!
//! Every statement is idempotent (`IF NOT EXISTS`), so running the set
//! against an existing database is a no-op.

use sqlx::sqlite::SqlitePool;

use crate::error::DbError;

const MIGRATIONS: &[(&str, &str)] = &[
	(
		"001_users_and_sessions",
		include_str!("../migrations/001_users_and_sessions.sql"),
	),
	(
		"002_projects_and_contributors",
		include_str!("../migrations/002_projects_and_contributors.sql"),
	),
	(
		"003_issues_and_comments",
		include_str!("../migrations/003_issues_and_comments.sql"),
	),
];

/// Run all database migrations (001-003).
///
/// # Errors
/// Returns `DbError::Sqlx` if a statement fails.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
	for (name, sql) in MIGRATIONS {
		for stmt in sql.split(';').filter(|s| !s.trim().is_empty()) {
			sqlx::query(stmt).execute(pool).await?;
		}
		tracing::debug!(migration = %name, "migration applied");
	}
	Ok(())
}
