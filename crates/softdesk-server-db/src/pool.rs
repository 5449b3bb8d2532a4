// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::{str::FromStr, time::Duration};

use sqlx::sqlite::{
	SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

use crate::error::DbError;

/// Writers wait this long on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the SoftDesk database, creating the file on first use.
///
/// Foreign keys must be on: a user still referenced by a project, issue or
/// comment cannot be deleted until ownership has been handed over.
#[tracing::instrument(skip(database_url))]
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, DbError> {
	let options = SqliteConnectOptions::from_str(database_url)
		.map_err(|e| DbError::Internal(format!("bad database url: {e}")))?
		.create_if_missing(true)
		.foreign_keys(true)
		.busy_timeout(BUSY_TIMEOUT)
		.journal_mode(SqliteJournalMode::Wal)
		.synchronous(SqliteSynchronous::Normal);

	let pool = SqlitePoolOptions::new().connect_with(options).await?;
	tracing::debug!(max_connections = pool.options().get_max_connections(), "sqlite pool ready");
	Ok(pool)
}
