// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User repository for database operations.
//!
//! This module provides database access for:
//! - Registration and profile updates
//! - Lookup by id and username (login)
//! - Admin discovery for account reassignment
//! - Account deletion with reassignment (see [`crate::reassignment`])

use async_trait::async_trait;
use chrono::Utc;
use softdesk_server_auth::{FallbackCandidate, ReassignmentSummary, User, UserId};
use sqlx::{sqlite::SqlitePool, Row};

use crate::convert::{parse_date, parse_id, parse_timestamp};
use crate::error::{conflict_on_unique, DbError};

#[async_trait]
pub trait UserStore: Send + Sync {
	async fn create_user(&self, user: &User) -> Result<(), DbError>;
	async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, DbError>;
	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError>;
	async fn list_users(&self) -> Result<Vec<User>, DbError>;
	async fn update_user(&self, user: &User) -> Result<(), DbError>;
	async fn list_admin_candidates(&self) -> Result<Vec<FallbackCandidate>, DbError>;
	async fn reassign_and_delete_user(&self, id: &UserId) -> Result<ReassignmentSummary, DbError>;
}

/// Repository for user accounts.
#[derive(Clone)]
pub struct UserRepository {
	pub(crate) pool: SqlitePool,
}

impl UserRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert a new user.
	///
	/// # Errors
	/// Returns `DbError::Conflict` if the username is taken.
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id, username = %user.username))]
	pub async fn create_user(&self, user: &User) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO users (id, username, password_hash, date_of_birth, can_be_contacted,
				can_data_be_shared, is_admin, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(user.id.to_string())
		.bind(&user.username)
		.bind(&user.password_hash)
		.bind(user.date_of_birth.format("%Y-%m-%d").to_string())
		.bind(user.can_be_contacted as i32)
		.bind(user.can_data_be_shared as i32)
		.bind(user.is_admin as i32)
		.bind(user.created_at.to_rfc3339())
		.bind(user.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await
		.map_err(|e| conflict_on_unique(e, "A user with that username already exists"))?;

		tracing::debug!(user_id = %user.id, is_admin = user.is_admin, "user created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, username, password_hash, date_of_birth, can_be_contacted,
				can_data_be_shared, is_admin, created_at, updated_at
			FROM users
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_user(&r)).transpose()
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, username, password_hash, date_of_birth, can_be_contacted,
				can_data_be_shared, is_admin, created_at, updated_at
			FROM users
			WHERE username = ?
			"#,
		)
		.bind(username)
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_user(&r)).transpose()
	}

	/// All users, oldest first.
	#[tracing::instrument(skip(self))]
	pub async fn list_users(&self) -> Result<Vec<User>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, username, password_hash, date_of_birth, can_be_contacted,
				can_data_be_shared, is_admin, created_at, updated_at
			FROM users
			ORDER BY created_at ASC, id ASC
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_user).collect()
	}

	/// Persist the mutable profile fields: consents, date of birth and password hash.
	///
	/// The username and admin flag are never changed here.
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
	pub async fn update_user(&self, user: &User) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			UPDATE users
			SET password_hash = ?, date_of_birth = ?, can_be_contacted = ?,
				can_data_be_shared = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&user.password_hash)
		.bind(user.date_of_birth.format("%Y-%m-%d").to_string())
		.bind(user.can_be_contacted as i32)
		.bind(user.can_data_be_shared as i32)
		.bind(Utc::now().to_rfc3339())
		.bind(user.id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("user {}", user.id)));
		}
		tracing::debug!(user_id = %user.id, "user updated");
		Ok(())
	}

	/// Admin accounts, as candidates to inherit a deleted user's projects.
	#[tracing::instrument(skip(self))]
	pub async fn list_admin_candidates(&self) -> Result<Vec<FallbackCandidate>, DbError> {
		let rows = sqlx::query("SELECT id, created_at FROM users WHERE is_admin = 1")
			.fetch_all(&self.pool)
			.await?;
		rows.iter().map(row_to_candidate).collect()
	}
}

#[async_trait]
impl UserStore for UserRepository {
	async fn create_user(&self, user: &User) -> Result<(), DbError> {
		self.create_user(user).await
	}

	async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, DbError> {
		self.get_user_by_id(id).await
	}

	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		self.get_user_by_username(username).await
	}

	async fn list_users(&self) -> Result<Vec<User>, DbError> {
		self.list_users().await
	}

	async fn update_user(&self, user: &User) -> Result<(), DbError> {
		self.update_user(user).await
	}

	async fn list_admin_candidates(&self) -> Result<Vec<FallbackCandidate>, DbError> {
		self.list_admin_candidates().await
	}

	async fn reassign_and_delete_user(&self, id: &UserId) -> Result<ReassignmentSummary, DbError> {
		self.reassign_and_delete_user(id).await
	}
}

pub(crate) fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User, DbError> {
	let id: String = row.get("id");
	let date_of_birth: String = row.get("date_of_birth");
	let can_be_contacted: i32 = row.get("can_be_contacted");
	let can_data_be_shared: i32 = row.get("can_data_be_shared");
	let is_admin: i32 = row.get("is_admin");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(User {
		id: parse_id(&id, "user ID")?,
		username: row.get("username"),
		password_hash: row.get("password_hash"),
		date_of_birth: parse_date(&date_of_birth, "date_of_birth")?,
		can_be_contacted: can_be_contacted != 0,
		can_data_be_shared: can_data_be_shared != 0,
		is_admin: is_admin != 0,
		created_at: parse_timestamp(&created_at, "created_at")?,
		updated_at: parse_timestamp(&updated_at, "updated_at")?,
	})
}

pub(crate) fn row_to_candidate(row: &sqlx::sqlite::SqliteRow) -> Result<FallbackCandidate, DbError> {
	let id: String = row.get("id");
	let created_at: String = row.get("created_at");
	Ok(FallbackCandidate {
		user_id: parse_id(&id, "user ID")?,
		created_at: parse_timestamp(&created_at, "created_at")?,
	})
}
