// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account deletion with reassignment.
//!
//! Every record that references a user is handed over before the user row is
//! removed, inside a single transaction. If any step fails nothing changes.

use chrono::Utc;
use softdesk_server_auth::{
	plan_edge_transfer, select_fallback_admin, EdgeTransfer, ReassignmentSummary, UserId,
};
use sqlx::Row;

use crate::error::DbError;
use crate::user::{row_to_candidate, UserRepository};

impl UserRepository {
	/// Reassign everything the user owns or authored, then delete the user.
	///
	/// # Errors
	/// - `DbError::NotFound` if the user does not exist
	/// - `DbError::Configuration` if no other admin exists to inherit projects
	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn reassign_and_delete_user(&self, id: &UserId) -> Result<ReassignmentSummary, DbError> {
		let user_id = id.to_string();
		let now = Utc::now().to_rfc3339();
		let mut tx = self.pool.begin().await?;

		// Write first so the transaction holds the write lock before it reads
		// the admin list. A read-then-write transaction can lose its snapshot
		// to another writer, which the busy timeout does not retry.
		let touched = sqlx::query("UPDATE users SET updated_at = ? WHERE id = ?")
			.bind(&now)
			.bind(&user_id)
			.execute(&mut *tx)
			.await?
			.rows_affected();
		if touched == 0 {
			return Err(DbError::NotFound(format!("user {id}")));
		}

		let rows = sqlx::query("SELECT id, created_at FROM users WHERE is_admin = 1")
			.fetch_all(&mut *tx)
			.await?;
		let candidates = rows
			.iter()
			.map(row_to_candidate)
			.collect::<Result<Vec<_>, _>>()?;
		let Some(fallback) = select_fallback_admin(&candidates, *id) else {
			tracing::error!(user_id = %id, "no admin account available to inherit projects");
			return Err(DbError::Configuration(
				"no fallback admin exists to inherit the deleted user's projects".to_string(),
			));
		};
		let fallback_id = fallback.to_string();

		let mut summary = ReassignmentSummary {
			deleted_user_id: Some(*id),
			fallback_admin_id: Some(fallback),
			..Default::default()
		};

		summary.projects_reassigned =
			sqlx::query("UPDATE projects SET owner_id = ?, updated_at = ? WHERE owner_id = ?")
				.bind(&fallback_id)
				.bind(&now)
				.bind(&user_id)
				.execute(&mut *tx)
				.await?
				.rows_affected();

		// Runs after the project update so issues follow the new owner.
		summary.issues_reassigned = sqlx::query(
			r#"
			UPDATE issues
			SET author_id = (SELECT owner_id FROM projects WHERE projects.id = issues.project_id),
				updated_at = ?
			WHERE author_id = ?
			"#,
		)
		.bind(&now)
		.bind(&user_id)
		.execute(&mut *tx)
		.await?
		.rows_affected();

		summary.comments_reassigned = sqlx::query(
			r#"
			UPDATE comments
			SET author_id = (
				SELECT p.owner_id
				FROM issues i
				JOIN projects p ON p.id = i.project_id
				WHERE i.id = comments.issue_id
			),
				updated_at = ?
			WHERE author_id = ?
			"#,
		)
		.bind(&now)
		.bind(&user_id)
		.execute(&mut *tx)
		.await?
		.rows_affected();

		summary.assignments_cleared =
			sqlx::query("UPDATE issues SET assigned_to = NULL, updated_at = ? WHERE assigned_to = ?")
				.bind(&now)
				.bind(&user_id)
				.execute(&mut *tx)
				.await?
				.rows_affected();

		// The fallback may now own projects it was a contributor on.
		summary.contributor_edges_dropped = sqlx::query(
			r#"
			DELETE FROM contributors
			WHERE user_id = ?
				AND project_id IN (SELECT id FROM projects WHERE owner_id = ?)
			"#,
		)
		.bind(&fallback_id)
		.bind(&fallback_id)
		.execute(&mut *tx)
		.await?
		.rows_affected();

		let edges = sqlx::query(
			r#"
			SELECT c.id,
				EXISTS(
					SELECT 1 FROM contributors f WHERE f.project_id = c.project_id AND f.user_id = ?
				) AS fallback_has_edge,
				EXISTS(
					SELECT 1 FROM projects p WHERE p.id = c.project_id AND p.owner_id = ?
				) AS fallback_owns_project
			FROM contributors c
			WHERE c.user_id = ?
			"#,
		)
		.bind(&fallback_id)
		.bind(&fallback_id)
		.bind(&user_id)
		.fetch_all(&mut *tx)
		.await?;

		for edge in &edges {
			let edge_id: String = edge.get("id");
			let has_edge: i64 = edge.get("fallback_has_edge");
			let owns: i64 = edge.get("fallback_owns_project");
			match plan_edge_transfer(has_edge != 0, owns != 0) {
				EdgeTransfer::Move => {
					sqlx::query("UPDATE contributors SET user_id = ? WHERE id = ?")
						.bind(&fallback_id)
						.bind(&edge_id)
						.execute(&mut *tx)
						.await?;
					summary.contributor_edges_moved += 1;
				}
				EdgeTransfer::Drop => {
					sqlx::query("DELETE FROM contributors WHERE id = ?")
						.bind(&edge_id)
						.execute(&mut *tx)
						.await?;
					summary.contributor_edges_dropped += 1;
				}
			}
		}

		summary.sessions_revoked = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
			.bind(&user_id)
			.execute(&mut *tx)
			.await?
			.rows_affected();

		sqlx::query("DELETE FROM users WHERE id = ?")
			.bind(&user_id)
			.execute(&mut *tx)
			.await?;

		tx.commit().await?;

		tracing::info!(
			user_id = %id,
			fallback_admin_id = %fallback,
			projects = summary.projects_reassigned,
			issues = summary.issues_reassigned,
			comments = summary.comments_reassigned,
			"user deleted with reassignment"
		);
		Ok(summary)
	}
}
