// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project repository for database operations.
//!
//! This module provides database access for:
//! - Project CRUD, including the transactional cascade delete
//! - Contributor membership edges (unique per project and user)
//! - Membership lookups used by role resolution

use async_trait::async_trait;
use chrono::Utc;
use softdesk_server_auth::{Contributor, Project, ProjectId, UserId};
use sqlx::{sqlite::SqlitePool, Row};

use crate::convert::{parse_choice, parse_id, parse_timestamp};
use crate::error::{conflict_on_unique, DbError};

/// A contributor edge joined with the member's username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorWithUser {
	pub contributor: Contributor,
	pub username: String,
}

/// Rows removed by a project cascade delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectCascade {
	pub comments: u64,
	pub issues: u64,
	pub contributors: u64,
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
	async fn create_project(&self, project: &Project) -> Result<(), DbError>;
	async fn get_project_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DbError>;
	async fn list_projects_for_user(&self, user_id: &UserId) -> Result<Vec<Project>, DbError>;
	async fn update_project(&self, project: &Project) -> Result<(), DbError>;
	async fn delete_project_cascade(&self, id: &ProjectId) -> Result<ProjectCascade, DbError>;
	async fn add_contributor(&self, contributor: &Contributor) -> Result<(), DbError>;
	async fn get_contributor(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<Option<ContributorWithUser>, DbError>;
	async fn is_contributor(&self, project_id: &ProjectId, user_id: &UserId) -> Result<bool, DbError>;
	async fn list_contributors(&self, project_id: &ProjectId) -> Result<Vec<ContributorWithUser>, DbError>;
	async fn remove_contributor(&self, project_id: &ProjectId, user_id: &UserId) -> Result<bool, DbError>;
}

/// Repository for projects and their contributor edges.
#[derive(Clone)]
pub struct ProjectRepository {
	pool: SqlitePool,
}

impl ProjectRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	// =========================================================================
	// Project CRUD
	// =========================================================================

	/// Insert a new project.
	///
	/// # Database Constraints
	/// - `owner_id` must reference an existing user
	#[tracing::instrument(skip(self, project), fields(project_id = %project.id, owner_id = %project.owner_id))]
	pub async fn create_project(&self, project: &Project) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO projects (id, name, description, project_type, owner_id, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(project.id.to_string())
		.bind(&project.name)
		.bind(&project.description)
		.bind(project.project_type.as_str())
		.bind(project.owner_id.to_string())
		.bind(project.created_at.to_rfc3339())
		.bind(project.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(project_id = %project.id, "project created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(project_id = %id))]
	pub async fn get_project_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, name, description, project_type, owner_id, created_at, updated_at
			FROM projects
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_project(&r)).transpose()
	}

	/// Projects the user owns or contributes to, oldest first.
	#[tracing::instrument(skip(self), fields(user_id = %user_id))]
	pub async fn list_projects_for_user(&self, user_id: &UserId) -> Result<Vec<Project>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT p.id, p.name, p.description, p.project_type, p.owner_id, p.created_at, p.updated_at
			FROM projects p
			WHERE p.owner_id = ?
				OR EXISTS (
					SELECT 1 FROM contributors c
					WHERE c.project_id = p.id AND c.user_id = ?
				)
			ORDER BY p.created_at ASC, p.id ASC
			"#,
		)
		.bind(user_id.to_string())
		.bind(user_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		let projects: Vec<Project> = rows.iter().map(row_to_project).collect::<Result<_, _>>()?;
		tracing::debug!(user_id = %user_id, count = projects.len(), "listed projects for user");
		Ok(projects)
	}

	/// Persist name, description and type. The owner is not touched.
	#[tracing::instrument(skip(self, project), fields(project_id = %project.id))]
	pub async fn update_project(&self, project: &Project) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			UPDATE projects
			SET name = ?, description = ?, project_type = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&project.name)
		.bind(&project.description)
		.bind(project.project_type.as_str())
		.bind(Utc::now().to_rfc3339())
		.bind(project.id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("project {}", project.id)));
		}
		tracing::debug!(project_id = %project.id, "project updated");
		Ok(())
	}

	/// Delete a project with its comments, issues and contributor edges.
	///
	/// Runs in one transaction: either everything goes or nothing does.
	#[tracing::instrument(skip(self), fields(project_id = %id))]
	pub async fn delete_project_cascade(&self, id: &ProjectId) -> Result<ProjectCascade, DbError> {
		let project_id = id.to_string();
		let mut tx = self.pool.begin().await?;

		let comments = sqlx::query(
			r#"
			DELETE FROM comments
			WHERE issue_id IN (SELECT id FROM issues WHERE project_id = ?)
			"#,
		)
		.bind(&project_id)
		.execute(&mut *tx)
		.await?
		.rows_affected();

		let issues = sqlx::query("DELETE FROM issues WHERE project_id = ?")
			.bind(&project_id)
			.execute(&mut *tx)
			.await?
			.rows_affected();

		let contributors = sqlx::query("DELETE FROM contributors WHERE project_id = ?")
			.bind(&project_id)
			.execute(&mut *tx)
			.await?
			.rows_affected();

		let deleted = sqlx::query("DELETE FROM projects WHERE id = ?")
			.bind(&project_id)
			.execute(&mut *tx)
			.await?
			.rows_affected();

		if deleted == 0 {
			return Err(DbError::NotFound(format!("project {id}")));
		}

		tx.commit().await?;

		let cascade = ProjectCascade {
			comments,
			issues,
			contributors,
		};
		tracing::debug!(
			project_id = %id,
			comments = cascade.comments,
			issues = cascade.issues,
			contributors = cascade.contributors,
			"project deleted"
		);
		Ok(cascade)
	}

	// =========================================================================
	// Contributors
	// =========================================================================

	/// Add a contributor edge.
	///
	/// # Errors
	/// Returns `DbError::Conflict` if the user already contributes to the
	/// project, including when two adds race.
	#[tracing::instrument(skip(self, contributor), fields(project_id = %contributor.project_id, user_id = %contributor.user_id))]
	pub async fn add_contributor(&self, contributor: &Contributor) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO contributors (id, project_id, user_id, created_at)
			VALUES (?, ?, ?, ?)
			"#,
		)
		.bind(contributor.id.to_string())
		.bind(contributor.project_id.to_string())
		.bind(contributor.user_id.to_string())
		.bind(contributor.created_at.to_rfc3339())
		.execute(&self.pool)
		.await
		.map_err(|e| conflict_on_unique(e, "User is already a contributor to this project"))?;

		tracing::debug!(
			project_id = %contributor.project_id,
			user_id = %contributor.user_id,
			"contributor added"
		);
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(project_id = %project_id, user_id = %user_id))]
	pub async fn get_contributor(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<Option<ContributorWithUser>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT c.id, c.project_id, c.user_id, c.created_at, u.username
			FROM contributors c
			INNER JOIN users u ON u.id = c.user_id
			WHERE c.project_id = ? AND c.user_id = ?
			"#,
		)
		.bind(project_id.to_string())
		.bind(user_id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_contributor_with_user(&r)).transpose()
	}

	#[tracing::instrument(skip(self), fields(project_id = %project_id, user_id = %user_id))]
	pub async fn is_contributor(&self, project_id: &ProjectId, user_id: &UserId) -> Result<bool, DbError> {
		let row: (i64,) = sqlx::query_as(
			"SELECT COUNT(*) FROM contributors WHERE project_id = ? AND user_id = ?",
		)
		.bind(project_id.to_string())
		.bind(user_id.to_string())
		.fetch_one(&self.pool)
		.await?;
		Ok(row.0 > 0)
	}

	/// Contributor edges of a project with usernames, in join order.
	#[tracing::instrument(skip(self), fields(project_id = %project_id))]
	pub async fn list_contributors(&self, project_id: &ProjectId) -> Result<Vec<ContributorWithUser>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT c.id, c.project_id, c.user_id, c.created_at, u.username
			FROM contributors c
			INNER JOIN users u ON u.id = c.user_id
			WHERE c.project_id = ?
			ORDER BY c.created_at ASC, c.id ASC
			"#,
		)
		.bind(project_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_contributor_with_user).collect()
	}

	#[tracing::instrument(skip(self), fields(project_id = %project_id, user_id = %user_id))]
	pub async fn remove_contributor(&self, project_id: &ProjectId, user_id: &UserId) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM contributors WHERE project_id = ? AND user_id = ?")
			.bind(project_id.to_string())
			.bind(user_id.to_string())
			.execute(&self.pool)
			.await?;

		let removed = result.rows_affected() > 0;
		if removed {
			tracing::debug!(project_id = %project_id, user_id = %user_id, "contributor removed");
		}
		Ok(removed)
	}
}

#[async_trait]
impl ProjectStore for ProjectRepository {
	async fn create_project(&self, project: &Project) -> Result<(), DbError> {
		self.create_project(project).await
	}

	async fn get_project_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DbError> {
		self.get_project_by_id(id).await
	}

	async fn list_projects_for_user(&self, user_id: &UserId) -> Result<Vec<Project>, DbError> {
		self.list_projects_for_user(user_id).await
	}

	async fn update_project(&self, project: &Project) -> Result<(), DbError> {
		self.update_project(project).await
	}

	async fn delete_project_cascade(&self, id: &ProjectId) -> Result<ProjectCascade, DbError> {
		self.delete_project_cascade(id).await
	}

	async fn add_contributor(&self, contributor: &Contributor) -> Result<(), DbError> {
		self.add_contributor(contributor).await
	}

	async fn get_contributor(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<Option<ContributorWithUser>, DbError> {
		self.get_contributor(project_id, user_id).await
	}

	async fn is_contributor(&self, project_id: &ProjectId, user_id: &UserId) -> Result<bool, DbError> {
		self.is_contributor(project_id, user_id).await
	}

	async fn list_contributors(&self, project_id: &ProjectId) -> Result<Vec<ContributorWithUser>, DbError> {
		self.list_contributors(project_id).await
	}

	async fn remove_contributor(&self, project_id: &ProjectId, user_id: &UserId) -> Result<bool, DbError> {
		self.remove_contributor(project_id, user_id).await
	}
}

fn row_to_project(row: &sqlx::sqlite::SqliteRow) -> Result<Project, DbError> {
	let id: String = row.get("id");
	let project_type: String = row.get("project_type");
	let owner_id: String = row.get("owner_id");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(Project {
		id: parse_id(&id, "project ID")?,
		name: row.get("name"),
		description: row.get("description"),
		project_type: parse_choice(&project_type)?,
		owner_id: parse_id(&owner_id, "owner_id")?,
		created_at: parse_timestamp(&created_at, "created_at")?,
		updated_at: parse_timestamp(&updated_at, "updated_at")?,
	})
}

fn row_to_contributor_with_user(row: &sqlx::sqlite::SqliteRow) -> Result<ContributorWithUser, DbError> {
	let id: String = row.get("id");
	let project_id: String = row.get("project_id");
	let user_id: String = row.get("user_id");
	let created_at: String = row.get("created_at");

	Ok(ContributorWithUser {
		contributor: Contributor {
			id: parse_id(&id, "contributor ID")?,
			project_id: parse_id(&project_id, "project_id")?,
			user_id: parse_id(&user_id, "user_id")?,
			created_at: parse_timestamp(&created_at, "created_at")?,
		},
		username: row.get("username"),
	})
}
