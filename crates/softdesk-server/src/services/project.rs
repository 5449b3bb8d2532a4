// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project operations.

use std::sync::Arc;

use chrono::Utc;
use softdesk_server_api::{CreateProjectRequest, UpdateProjectRequest};
use softdesk_server_auth::project::validate_project_fields;
use softdesk_server_auth::{
	AuthContext, Operation, Project, ProjectId, ProjectType, ResourceAttrs, ResourceRef, RoleSet,
	SubjectAttrs,
};
use softdesk_server_db::{ContributorWithUser, IssueStore, IssueTitle, ProjectCascade, ProjectStore};

use super::access::{check, AccessResolver};
use super::error::{parse_choice, ServiceError};

/// A project with the read-model fields shown on its detail view.
#[derive(Debug, Clone)]
pub struct ProjectDetail {
	pub project: Project,
	pub contributors: Vec<ContributorWithUser>,
	pub issue_titles: Vec<IssueTitle>,
}

#[derive(Clone)]
pub struct ProjectService {
	access: AccessResolver,
	projects: Arc<dyn ProjectStore>,
	issues: Arc<dyn IssueStore>,
}

impl ProjectService {
	pub fn new(access: AccessResolver, projects: Arc<dyn ProjectStore>, issues: Arc<dyn IssueStore>) -> Self {
		Self {
			access,
			projects,
			issues,
		}
	}

	/// Projects the actor owns or contributes to.
	#[tracing::instrument(skip(self, auth))]
	pub async fn list(&self, auth: &AuthContext) -> Result<Vec<Project>, ServiceError> {
		let subject = SubjectAttrs::from_auth(auth);
		check(&subject, &RoleSet::none(), &ResourceAttrs::project(None), Operation::List)?;
		let user_id = subject.user_id.ok_or(ServiceError::NotAuthenticated)?;
		Ok(self.projects.list_projects_for_user(&user_id).await?)
	}

	#[tracing::instrument(skip(self, auth), fields(%project_id))]
	pub async fn get(&self, auth: &AuthContext, project_id: ProjectId) -> Result<ProjectDetail, ServiceError> {
		let scope = self
			.access
			.resolve(auth, &ResourceRef::Project(Some(project_id)))
			.await?;
		scope.require(&ResourceAttrs::project(Some(project_id)), Operation::Read)?;

		let project = scope.project()?.clone();
		let contributors = self.projects.list_contributors(&project_id).await?;
		let issue_titles = self.issues.list_issue_titles(&project_id).await?;
		Ok(ProjectDetail {
			project,
			contributors,
			issue_titles,
		})
	}

	/// Create a project owned by the actor.
	#[tracing::instrument(skip(self, auth, request), fields(name = %request.name))]
	pub async fn create(&self, auth: &AuthContext, request: CreateProjectRequest) -> Result<Project, ServiceError> {
		let subject = SubjectAttrs::from_auth(auth);
		check(&subject, &RoleSet::none(), &ResourceAttrs::project(None), Operation::Create)?;
		let owner_id = subject.user_id.ok_or(ServiceError::NotAuthenticated)?;

		validate_project_fields(Some(&request.name), Some(&request.description))?;
		let project_type: ProjectType = parse_choice("type", &request.project_type)?;

		let project = Project::new(owner_id, request.name, request.description, project_type);
		self.projects.create_project(&project).await?;
		tracing::debug!(project_id = %project.id, %owner_id, "project created");
		Ok(project)
	}

	#[tracing::instrument(skip(self, auth, request), fields(%project_id))]
	pub async fn update(
		&self,
		auth: &AuthContext,
		project_id: ProjectId,
		request: UpdateProjectRequest,
	) -> Result<Project, ServiceError> {
		let scope = self
			.access
			.resolve(auth, &ResourceRef::Project(Some(project_id)))
			.await?;
		scope.require(&ResourceAttrs::project(Some(project_id)), Operation::Update)?;

		validate_project_fields(request.name.as_deref(), request.description.as_deref())?;
		let mut project = scope.project()?.clone();
		if let Some(project_type) = request.project_type.as_deref() {
			project.project_type = parse_choice("type", project_type)?;
		}
		if let Some(name) = request.name {
			project.name = name;
		}
		if let Some(description) = request.description {
			project.description = description;
		}
		project.updated_at = Utc::now();

		self.projects.update_project(&project).await?;
		tracing::debug!(%project_id, "project updated");
		Ok(project)
	}

	/// Delete the project with everything filed under it.
	#[tracing::instrument(skip(self, auth), fields(%project_id))]
	pub async fn delete(&self, auth: &AuthContext, project_id: ProjectId) -> Result<ProjectCascade, ServiceError> {
		let scope = self
			.access
			.resolve(auth, &ResourceRef::Project(Some(project_id)))
			.await?;
		scope.require(&ResourceAttrs::project(Some(project_id)), Operation::Delete)?;

		let cascade = self.projects.delete_project_cascade(&project_id).await?;
		tracing::debug!(
			%project_id,
			issues = cascade.issues,
			comments = cascade.comments,
			"project deleted"
		);
		Ok(cascade)
	}
}
