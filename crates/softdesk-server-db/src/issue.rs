// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Issue repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use softdesk_server_auth::{Issue, IssueId, ProjectId};
use sqlx::{sqlite::SqlitePool, Row};

use crate::convert::{parse_choice, parse_id, parse_optional_id, parse_timestamp};
use crate::error::DbError;

/// Id and title of an issue, for project detail views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueTitle {
	pub id: IssueId,
	pub title: String,
}

#[async_trait]
pub trait IssueStore: Send + Sync {
	async fn create_issue(&self, issue: &Issue) -> Result<(), DbError>;
	async fn get_issue_by_id(&self, id: &IssueId) -> Result<Option<Issue>, DbError>;
	async fn list_issues_for_project(&self, project_id: &ProjectId) -> Result<Vec<Issue>, DbError>;
	async fn list_issue_titles(&self, project_id: &ProjectId) -> Result<Vec<IssueTitle>, DbError>;
	async fn update_issue(&self, issue: &Issue) -> Result<(), DbError>;
	async fn delete_issue(&self, id: &IssueId) -> Result<bool, DbError>;
}

#[derive(Clone)]
pub struct IssueRepository {
	pool: SqlitePool,
}

impl IssueRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, issue), fields(issue_id = %issue.id, project_id = %issue.project_id))]
	pub async fn create_issue(&self, issue: &Issue) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO issues (id, project_id, author_id, title, description, priority, tag,
				status, assigned_to, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(issue.id.to_string())
		.bind(issue.project_id.to_string())
		.bind(issue.author_id.to_string())
		.bind(&issue.title)
		.bind(&issue.description)
		.bind(issue.priority.as_str())
		.bind(issue.tag.as_str())
		.bind(issue.status.as_str())
		.bind(issue.assigned_to.map(|id| id.to_string()))
		.bind(issue.created_at.to_rfc3339())
		.bind(issue.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(issue_id = %issue.id, "issue created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(issue_id = %id))]
	pub async fn get_issue_by_id(&self, id: &IssueId) -> Result<Option<Issue>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, project_id, author_id, title, description, priority, tag, status,
				assigned_to, created_at, updated_at
			FROM issues
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_issue(&r)).transpose()
	}

	#[tracing::instrument(skip(self), fields(project_id = %project_id))]
	pub async fn list_issues_for_project(&self, project_id: &ProjectId) -> Result<Vec<Issue>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, project_id, author_id, title, description, priority, tag, status,
				assigned_to, created_at, updated_at
			FROM issues
			WHERE project_id = ?
			ORDER BY created_at ASC, id ASC
			"#,
		)
		.bind(project_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_issue).collect()
	}

	#[tracing::instrument(skip(self), fields(project_id = %project_id))]
	pub async fn list_issue_titles(&self, project_id: &ProjectId) -> Result<Vec<IssueTitle>, DbError> {
		let rows = sqlx::query(
			"SELECT id, title FROM issues WHERE project_id = ? ORDER BY created_at ASC, id ASC",
		)
		.bind(project_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows
			.iter()
			.map(|row| {
				let id: String = row.get("id");
				Ok(IssueTitle {
					id: parse_id(&id, "issue ID")?,
					title: row.get("title"),
				})
			})
			.collect()
	}

	/// Persist the editable fields. `project_id` and `author_id` are immutable here.
	#[tracing::instrument(skip(self, issue), fields(issue_id = %issue.id))]
	pub async fn update_issue(&self, issue: &Issue) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			UPDATE issues
			SET title = ?, description = ?, priority = ?, tag = ?, status = ?,
				assigned_to = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&issue.title)
		.bind(&issue.description)
		.bind(issue.priority.as_str())
		.bind(issue.tag.as_str())
		.bind(issue.status.as_str())
		.bind(issue.assigned_to.map(|id| id.to_string()))
		.bind(Utc::now().to_rfc3339())
		.bind(issue.id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("issue {}", issue.id)));
		}
		tracing::debug!(issue_id = %issue.id, "issue updated");
		Ok(())
	}

	/// Delete an issue and its comments in one transaction.
	#[tracing::instrument(skip(self), fields(issue_id = %id))]
	pub async fn delete_issue(&self, id: &IssueId) -> Result<bool, DbError> {
		let mut tx = self.pool.begin().await?;

		let comments = sqlx::query("DELETE FROM comments WHERE issue_id = ?")
			.bind(id.to_string())
			.execute(&mut *tx)
			.await?
			.rows_affected();

		let deleted = sqlx::query("DELETE FROM issues WHERE id = ?")
			.bind(id.to_string())
			.execute(&mut *tx)
			.await?
			.rows_affected()
			> 0;

		tx.commit().await?;

		if deleted {
			tracing::debug!(issue_id = %id, comments, "issue deleted");
		}
		Ok(deleted)
	}
}

#[async_trait]
impl IssueStore for IssueRepository {
	async fn create_issue(&self, issue: &Issue) -> Result<(), DbError> {
		self.create_issue(issue).await
	}

	async fn get_issue_by_id(&self, id: &IssueId) -> Result<Option<Issue>, DbError> {
		self.get_issue_by_id(id).await
	}

	async fn list_issues_for_project(&self, project_id: &ProjectId) -> Result<Vec<Issue>, DbError> {
		self.list_issues_for_project(project_id).await
	}

	async fn list_issue_titles(&self, project_id: &ProjectId) -> Result<Vec<IssueTitle>, DbError> {
		self.list_issue_titles(project_id).await
	}

	async fn update_issue(&self, issue: &Issue) -> Result<(), DbError> {
		self.update_issue(issue).await
	}

	async fn delete_issue(&self, id: &IssueId) -> Result<bool, DbError> {
		self.delete_issue(id).await
	}
}

fn row_to_issue(row: &sqlx::sqlite::SqliteRow) -> Result<Issue, DbError> {
	let id: String = row.get("id");
	let project_id: String = row.get("project_id");
	let author_id: String = row.get("author_id");
	let priority: String = row.get("priority");
	let tag: String = row.get("tag");
	let status: String = row.get("status");
	let assigned_to: Option<String> = row.get("assigned_to");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(Issue {
		id: parse_id(&id, "issue ID")?,
		project_id: parse_id(&project_id, "project_id")?,
		author_id: parse_id(&author_id, "author_id")?,
		title: row.get("title"),
		description: row.get("description"),
		priority: parse_choice(&priority)?,
		tag: parse_choice(&tag)?,
		status: parse_choice(&status)?,
		assigned_to: parse_optional_id(assigned_to, "assigned_to")?,
		created_at: parse_timestamp(&created_at, "created_at")?,
		updated_at: parse_timestamp(&updated_at, "updated_at")?,
	})
}
