// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Issue operations.
//!
//! Reads and creation are open to every project member. Updates and deletes
//! go through two checks: membership before the issue is loaded, then
//! authorship once its author is known. The project owner gets no special
//! treatment on someone else's issue.

use std::sync::Arc;

use chrono::Utc;
use softdesk_server_api::{CreateIssueRequest, UpdateIssueRequest};
use softdesk_server_auth::issue::validate_issue_fields;
use softdesk_server_auth::{
	AuthContext, Issue, IssueId, Operation, Project, ProjectId, ResourceAttrs, ResourceRef, UserId,
};
use softdesk_server_db::{CommentStore, IssueStore};

use super::access::{AccessResolver, Scope};
use super::error::{parse_choice, ServiceError};

/// An issue with the read-model fields shown on its detail view.
#[derive(Debug, Clone)]
pub struct IssueDetail {
	pub issue: Issue,
	pub comment_names: Vec<String>,
}

#[derive(Clone)]
pub struct IssueService {
	access: AccessResolver,
	issues: Arc<dyn IssueStore>,
	comments: Arc<dyn CommentStore>,
}

impl IssueService {
	pub fn new(access: AccessResolver, issues: Arc<dyn IssueStore>, comments: Arc<dyn CommentStore>) -> Self {
		Self {
			access,
			issues,
			comments,
		}
	}

	#[tracing::instrument(skip(self, auth), fields(%project_id))]
	pub async fn list(&self, auth: &AuthContext, project_id: ProjectId) -> Result<Vec<Issue>, ServiceError> {
		let scope = self.member_scope(auth, project_id, Operation::List).await?;
		Ok(self.issues.list_issues_for_project(&scope.project()?.id).await?)
	}

	#[tracing::instrument(skip(self, auth), fields(%project_id, %issue_id))]
	pub async fn get(&self, auth: &AuthContext, project_id: ProjectId, issue_id: IssueId) -> Result<IssueDetail, ServiceError> {
		let scope = self.member_scope(auth, project_id, Operation::Read).await?;
		let issue = self.access.load_issue(scope.project()?, issue_id).await?;
		let comment_names = self.comments.list_comment_names(&issue.id).await?;
		Ok(IssueDetail { issue, comment_names })
	}

	/// File an issue. The author is always the actor.
	#[tracing::instrument(skip(self, auth, request), fields(%project_id))]
	pub async fn create(
		&self,
		auth: &AuthContext,
		project_id: ProjectId,
		request: CreateIssueRequest,
	) -> Result<Issue, ServiceError> {
		let scope = self.member_scope(auth, project_id, Operation::Create).await?;
		let author_id = scope.actor_id()?;
		let project = scope.project()?;

		validate_issue_fields(Some(&request.title), Some(&request.description))?;
		let mut issue = Issue::new(project.id, author_id, request.title, request.description);
		if let Some(priority) = request.priority.as_deref() {
			issue.priority = parse_choice("priority", priority)?;
		}
		if let Some(tag) = request.tag.as_deref() {
			issue.tag = parse_choice("tag", tag)?;
		}
		if let Some(status) = request.status.as_deref() {
			issue.status = parse_choice("status", status)?;
		}
		if let Some(assignee) = request.assigned_to {
			self.ensure_assignable(project, assignee).await?;
			issue.assigned_to = Some(assignee);
		}

		self.issues.create_issue(&issue).await?;
		tracing::debug!(issue_id = %issue.id, %project_id, %author_id, "issue created");
		Ok(issue)
	}

	#[tracing::instrument(skip(self, auth, request), fields(%project_id, %issue_id))]
	pub async fn update(
		&self,
		auth: &AuthContext,
		project_id: ProjectId,
		issue_id: IssueId,
		request: UpdateIssueRequest,
	) -> Result<Issue, ServiceError> {
		let (scope, mut issue) = self.authored_issue(auth, project_id, issue_id, Operation::Update).await?;

		validate_issue_fields(request.title.as_deref(), request.description.as_deref())?;
		if let Some(priority) = request.priority.as_deref() {
			issue.priority = parse_choice("priority", priority)?;
		}
		if let Some(tag) = request.tag.as_deref() {
			issue.tag = parse_choice("tag", tag)?;
		}
		if let Some(status) = request.status.as_deref() {
			issue.status = parse_choice("status", status)?;
		}
		match request.assigned_to {
			Some(Some(assignee)) => {
				self.ensure_assignable(scope.project()?, assignee).await?;
				issue.assigned_to = Some(assignee);
			}
			Some(None) => issue.assigned_to = None,
			None => {}
		}
		if let Some(title) = request.title {
			issue.title = title;
		}
		if let Some(description) = request.description {
			issue.description = description;
		}
		issue.updated_at = Utc::now();

		self.issues.update_issue(&issue).await?;
		tracing::debug!(%issue_id, "issue updated");
		Ok(issue)
	}

	/// Delete an issue and its comments.
	#[tracing::instrument(skip(self, auth), fields(%project_id, %issue_id))]
	pub async fn delete(&self, auth: &AuthContext, project_id: ProjectId, issue_id: IssueId) -> Result<(), ServiceError> {
		self.authored_issue(auth, project_id, issue_id, Operation::Delete)
			.await?;
		if !self.issues.delete_issue(&issue_id).await? {
			return Err(ServiceError::not_found("issue"));
		}
		tracing::debug!(%issue_id, "issue deleted");
		Ok(())
	}

	async fn member_scope(&self, auth: &AuthContext, project_id: ProjectId, operation: Operation) -> Result<Scope, ServiceError> {
		let target = ResourceRef::Issue {
			project_id,
			issue_id: None,
		};
		let scope = self.access.resolve(auth, &target).await?;
		scope.require(&ResourceAttrs::from_ref(&target), operation)?;
		Ok(scope)
	}

	async fn authored_issue(
		&self,
		auth: &AuthContext,
		project_id: ProjectId,
		issue_id: IssueId,
		operation: Operation,
	) -> Result<(Scope, Issue), ServiceError> {
		let scope = self.member_scope(auth, project_id, Operation::Read).await?;
		let issue = self.access.load_issue(scope.project()?, issue_id).await?;
		scope.require(
			&ResourceAttrs::issue(project_id).with_author(issue.author_id),
			operation,
		)?;
		Ok((scope, issue))
	}

	async fn ensure_assignable(&self, project: &Project, assignee: UserId) -> Result<(), ServiceError> {
		if self.access.is_member(project, assignee).await? {
			Ok(())
		} else {
			Err(ServiceError::validation(
				"assigned_to",
				"assignee must be the project owner or a contributor",
			))
		}
	}
}
