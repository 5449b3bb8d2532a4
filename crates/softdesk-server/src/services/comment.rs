// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Comment operations. Same shape as issues, one level deeper.

use std::sync::Arc;

use chrono::Utc;
use softdesk_server_api::{CreateCommentRequest, UpdateCommentRequest};
use softdesk_server_auth::comment::validate_comment_fields;
use softdesk_server_auth::{
	AuthContext, Comment, CommentId, IssueId, Operation, ProjectId, ResourceAttrs, ResourceRef,
};
use softdesk_server_db::CommentStore;

use super::access::{AccessResolver, Scope};
use super::error::ServiceError;

#[derive(Clone)]
pub struct CommentService {
	access: AccessResolver,
	comments: Arc<dyn CommentStore>,
}

impl CommentService {
	pub fn new(access: AccessResolver, comments: Arc<dyn CommentStore>) -> Self {
		Self { access, comments }
	}

	#[tracing::instrument(skip(self, auth), fields(%project_id, %issue_id))]
	pub async fn list(
		&self,
		auth: &AuthContext,
		project_id: ProjectId,
		issue_id: IssueId,
	) -> Result<Vec<Comment>, ServiceError> {
		self.member_scope(auth, project_id, issue_id, Operation::List)
			.await?;
		Ok(self.comments.list_comments_for_issue(&issue_id).await?)
	}

	#[tracing::instrument(skip(self, auth), fields(%project_id, %issue_id, %comment_id))]
	pub async fn get(
		&self,
		auth: &AuthContext,
		project_id: ProjectId,
		issue_id: IssueId,
		comment_id: CommentId,
	) -> Result<Comment, ServiceError> {
		self.member_scope(auth, project_id, issue_id, Operation::Read)
			.await?;
		self.load_comment(issue_id, comment_id).await
	}

	/// Post a comment. The author is always the actor.
	#[tracing::instrument(skip(self, auth, request), fields(%project_id, %issue_id))]
	pub async fn create(
		&self,
		auth: &AuthContext,
		project_id: ProjectId,
		issue_id: IssueId,
		request: CreateCommentRequest,
	) -> Result<Comment, ServiceError> {
		let scope = self
			.member_scope(auth, project_id, issue_id, Operation::Create)
			.await?;
		let author_id = scope.actor_id()?;

		validate_comment_fields(Some(&request.name), Some(&request.description))?;
		let comment = Comment::new(scope.issue()?.id, author_id, request.name, request.description);
		self.comments.create_comment(&comment).await?;
		tracing::debug!(comment_id = %comment.id, %issue_id, %author_id, "comment created");
		Ok(comment)
	}

	#[tracing::instrument(skip(self, auth, request), fields(%project_id, %issue_id, %comment_id))]
	pub async fn update(
		&self,
		auth: &AuthContext,
		project_id: ProjectId,
		issue_id: IssueId,
		comment_id: CommentId,
		request: UpdateCommentRequest,
	) -> Result<Comment, ServiceError> {
		let mut comment = self
			.authored_comment(auth, project_id, issue_id, comment_id, Operation::Update)
			.await?;

		validate_comment_fields(request.name.as_deref(), request.description.as_deref())?;
		if let Some(name) = request.name {
			comment.name = name;
		}
		if let Some(description) = request.description {
			comment.description = description;
		}
		comment.updated_at = Utc::now();

		self.comments.update_comment(&comment).await?;
		tracing::debug!(%comment_id, "comment updated");
		Ok(comment)
	}

	#[tracing::instrument(skip(self, auth), fields(%project_id, %issue_id, %comment_id))]
	pub async fn delete(
		&self,
		auth: &AuthContext,
		project_id: ProjectId,
		issue_id: IssueId,
		comment_id: CommentId,
	) -> Result<(), ServiceError> {
		self.authored_comment(auth, project_id, issue_id, comment_id, Operation::Delete)
			.await?;
		if !self.comments.delete_comment(&comment_id).await? {
			return Err(ServiceError::not_found("comment"));
		}
		tracing::debug!(%comment_id, "comment deleted");
		Ok(())
	}

	async fn member_scope(
		&self,
		auth: &AuthContext,
		project_id: ProjectId,
		issue_id: IssueId,
		operation: Operation,
	) -> Result<Scope, ServiceError> {
		let target = ResourceRef::Comment {
			project_id,
			issue_id,
			comment_id: None,
		};
		let scope = self.access.resolve(auth, &target).await?;
		scope.require(&ResourceAttrs::from_ref(&target), operation)?;
		Ok(scope)
	}

	async fn authored_comment(
		&self,
		auth: &AuthContext,
		project_id: ProjectId,
		issue_id: IssueId,
		comment_id: CommentId,
		operation: Operation,
	) -> Result<Comment, ServiceError> {
		let scope = self
			.member_scope(auth, project_id, issue_id, Operation::Read)
			.await?;
		let comment = self.load_comment(issue_id, comment_id).await?;
		scope.require(
			&ResourceAttrs::comment(project_id).with_author(comment.author_id),
			operation,
		)?;
		Ok(comment)
	}

	async fn load_comment(&self, issue_id: IssueId, comment_id: CommentId) -> Result<Comment, ServiceError> {
		match self.comments.get_comment_by_id(&comment_id).await? {
			Some(comment) if comment.issue_id == issue_id => Ok(comment),
			_ => Err(ServiceError::not_found("comment")),
		}
	}
}
