// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role resolution against stored state.
//!
//! [`AccessResolver::resolve`] walks a [`ResourceRef`] up to its owning
//! project (Comment → Issue → Project, Issue → Project, Contributor →
//! Project), loads the membership facts and hands them to the pure resolver.
//! The result is a [`Scope`] that services then check operations against.
//!
//! ```text
//! ResourceRef ──► load project ──► load parent issue ──► RoleSet
//!                     │ missing          │ missing / other project
//!                     └──► NotFound      └──► NotFound
//! ```
//!
//! Anonymous requests against project-scoped resources are refused before
//! anything is loaded, so they cannot probe for existence.

use std::sync::Arc;

use softdesk_server_auth::{
	authorize, resolve_identity_roles, resolve_roles, AuthContext, Decision, Issue, IssueId,
	Operation, Project, ProjectId, ResourceAttrs, ResourceRef, RoleSet, SubjectAttrs, UserId,
};
use softdesk_server_db::{IssueStore, ProjectStore};

use super::error::ServiceError;

/// What an actor is to a resource, plus the parents loaded on the way.
#[derive(Debug, Clone)]
pub struct Scope {
	pub subject: SubjectAttrs,
	pub roles: RoleSet,
	pub project: Option<Project>,
	pub issue: Option<Issue>,
}

impl Scope {
	/// Ask the policy engine; a denial becomes the matching service error.
	pub fn require(&self, resource: &ResourceAttrs, operation: Operation) -> Result<(), ServiceError> {
		check(&self.subject, &self.roles, resource, operation)
	}

	pub fn project(&self) -> Result<&Project, ServiceError> {
		self.project
			.as_ref()
			.ok_or_else(|| ServiceError::Internal("scope has no owning project".to_string()))
	}

	pub fn issue(&self) -> Result<&Issue, ServiceError> {
		self.issue
			.as_ref()
			.ok_or_else(|| ServiceError::Internal("scope has no parent issue".to_string()))
	}

	pub fn actor_id(&self) -> Result<UserId, ServiceError> {
		self.subject.user_id.ok_or(ServiceError::NotAuthenticated)
	}
}

/// Run the policy engine and translate the decision.
pub fn check(
	subject: &SubjectAttrs,
	roles: &RoleSet,
	resource: &ResourceAttrs,
	operation: Operation,
) -> Result<(), ServiceError> {
	match authorize(subject, roles, resource, operation) {
		Decision::Allow => Ok(()),
		Decision::Deny(reason) => Err(reason.into()),
	}
}

#[derive(Clone)]
pub struct AccessResolver {
	projects: Arc<dyn ProjectStore>,
	issues: Arc<dyn IssueStore>,
}

impl AccessResolver {
	pub fn new(projects: Arc<dyn ProjectStore>, issues: Arc<dyn IssueStore>) -> Self {
		Self { projects, issues }
	}

	/// Resolve the actor's roles for `resource`.
	///
	/// # Errors
	/// - `NotAuthenticated` for anonymous actors on project-scoped resources
	/// - `NotFound` if the owning project or parent issue is missing
	#[tracing::instrument(skip(self, auth), fields(kind = ?resource.kind()))]
	pub async fn resolve(&self, auth: &AuthContext, resource: &ResourceRef) -> Result<Scope, ServiceError> {
		let subject = SubjectAttrs::from_auth(auth);

		if let ResourceRef::Identity(target) = *resource {
			return Ok(Scope {
				roles: resolve_identity_roles(&subject, target),
				subject,
				project: None,
				issue: None,
			});
		}

		let Some(project_id) = resource.project_id() else {
			return Ok(Scope {
				subject,
				roles: RoleSet::none(),
				project: None,
				issue: None,
			});
		};

		let Some(user_id) = subject.user_id else {
			return Err(ServiceError::NotAuthenticated);
		};

		let project = self.load_project(project_id).await?;
		let issue = match resource.parent_issue_id() {
			Some(issue_id) => Some(self.load_issue(&project, issue_id).await?),
			None => None,
		};

		let is_contributor = self.projects.is_contributor(&project.id, &user_id).await?;
		let roles = resolve_roles(&subject, project.owner_id, is_contributor);
		tracing::debug!(%project_id, ?roles, "resolved roles");

		Ok(Scope {
			subject,
			roles,
			project: Some(project),
			issue,
		})
	}

	/// Load an issue, treating one filed under another project as missing.
	pub async fn load_issue(&self, project: &Project, issue_id: IssueId) -> Result<Issue, ServiceError> {
		match self.issues.get_issue_by_id(&issue_id).await? {
			Some(issue) if issue.project_id == project.id => Ok(issue),
			_ => Err(ServiceError::not_found("issue")),
		}
	}

	/// Whether `user_id` is the owner or a contributor of `project`.
	pub async fn is_member(&self, project: &Project, user_id: UserId) -> Result<bool, ServiceError> {
		if project.is_owned_by(user_id) {
			return Ok(true);
		}
		Ok(self.projects.is_contributor(&project.id, &user_id).await?)
	}

	async fn load_project(&self, project_id: ProjectId) -> Result<Project, ServiceError> {
		self.projects
			.get_project_by_id(&project_id)
			.await?
			.ok_or_else(|| ServiceError::not_found("project"))
	}
}
