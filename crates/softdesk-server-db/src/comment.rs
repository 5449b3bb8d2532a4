// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Comment repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use softdesk_server_auth::{Comment, CommentId, IssueId};
use sqlx::{sqlite::SqlitePool, Row};

use crate::convert::{parse_id, parse_timestamp};
use crate::error::DbError;

#[async_trait]
pub trait CommentStore: Send + Sync {
	async fn create_comment(&self, comment: &Comment) -> Result<(), DbError>;
	async fn get_comment_by_id(&self, id: &CommentId) -> Result<Option<Comment>, DbError>;
	async fn list_comments_for_issue(&self, issue_id: &IssueId) -> Result<Vec<Comment>, DbError>;
	async fn list_comment_names(&self, issue_id: &IssueId) -> Result<Vec<String>, DbError>;
	async fn update_comment(&self, comment: &Comment) -> Result<(), DbError>;
	async fn delete_comment(&self, id: &CommentId) -> Result<bool, DbError>;
}

#[derive(Clone)]
pub struct CommentRepository {
	pool: SqlitePool,
}

impl CommentRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, comment), fields(comment_id = %comment.id, issue_id = %comment.issue_id))]
	pub async fn create_comment(&self, comment: &Comment) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO comments (id, issue_id, author_id, name, description, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(comment.id.to_string())
		.bind(comment.issue_id.to_string())
		.bind(comment.author_id.to_string())
		.bind(&comment.name)
		.bind(&comment.description)
		.bind(comment.created_at.to_rfc3339())
		.bind(comment.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(comment_id = %comment.id, "comment created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(comment_id = %id))]
	pub async fn get_comment_by_id(&self, id: &CommentId) -> Result<Option<Comment>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, issue_id, author_id, name, description, created_at, updated_at
			FROM comments
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_comment(&r)).transpose()
	}

	#[tracing::instrument(skip(self), fields(issue_id = %issue_id))]
	pub async fn list_comments_for_issue(&self, issue_id: &IssueId) -> Result<Vec<Comment>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, issue_id, author_id, name, description, created_at, updated_at
			FROM comments
			WHERE issue_id = ?
			ORDER BY created_at ASC, id ASC
			"#,
		)
		.bind(issue_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_comment).collect()
	}

	/// Names of an issue's comments, for issue detail views.
	#[tracing::instrument(skip(self), fields(issue_id = %issue_id))]
	pub async fn list_comment_names(&self, issue_id: &IssueId) -> Result<Vec<String>, DbError> {
		let rows: Vec<(String,)> = sqlx::query_as(
			"SELECT name FROM comments WHERE issue_id = ? ORDER BY created_at ASC, id ASC",
		)
		.bind(issue_id.to_string())
		.fetch_all(&self.pool)
		.await?;
		Ok(rows.into_iter().map(|(name,)| name).collect())
	}

	#[tracing::instrument(skip(self, comment), fields(comment_id = %comment.id))]
	pub async fn update_comment(&self, comment: &Comment) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			UPDATE comments
			SET name = ?, description = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&comment.name)
		.bind(&comment.description)
		.bind(Utc::now().to_rfc3339())
		.bind(comment.id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("comment {}", comment.id)));
		}
		tracing::debug!(comment_id = %comment.id, "comment updated");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(comment_id = %id))]
	pub async fn delete_comment(&self, id: &CommentId) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM comments WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::debug!(comment_id = %id, "comment deleted");
		}
		Ok(deleted)
	}
}

#[async_trait]
impl CommentStore for CommentRepository {
	async fn create_comment(&self, comment: &Comment) -> Result<(), DbError> {
		self.create_comment(comment).await
	}

	async fn get_comment_by_id(&self, id: &CommentId) -> Result<Option<Comment>, DbError> {
		self.get_comment_by_id(id).await
	}

	async fn list_comments_for_issue(&self, issue_id: &IssueId) -> Result<Vec<Comment>, DbError> {
		self.list_comments_for_issue(issue_id).await
	}

	async fn list_comment_names(&self, issue_id: &IssueId) -> Result<Vec<String>, DbError> {
		self.list_comment_names(issue_id).await
	}

	async fn update_comment(&self, comment: &Comment) -> Result<(), DbError> {
		self.update_comment(comment).await
	}

	async fn delete_comment(&self, id: &CommentId) -> Result<bool, DbError> {
		self.delete_comment(id).await
	}
}

fn row_to_comment(row: &sqlx::sqlite::SqliteRow) -> Result<Comment, DbError> {
	let id: String = row.get("id");
	let issue_id: String = row.get("issue_id");
	let author_id: String = row.get("author_id");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(Comment {
		id: parse_id(&id, "comment ID")?,
		issue_id: parse_id(&issue_id, "issue_id")?,
		author_id: parse_id(&author_id, "author_id")?,
		name: row.get("name"),
		description: row.get("description"),
		created_at: parse_timestamp(&created_at, "created_at")?,
		updated_at: parse_timestamp(&updated_at, "updated_at")?,
	})
}
