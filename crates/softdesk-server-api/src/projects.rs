// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use softdesk_server_auth::{IssueId, Project, ProjectId, ProjectType, UserId};
use softdesk_server_db::{ContributorWithUser, IssueTitle};

/// A project in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectResponse {
	pub id: ProjectId,
	pub name: String,
	pub description: String,
	#[serde(rename = "type")]
	pub project_type: ProjectType,
	pub owner_id: UserId,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
	fn from(project: Project) -> Self {
		Self {
			id: project.id,
			name: project.name,
			description: project.description,
			project_type: project.project_type,
			owner_id: project.owner_id,
			created_at: project.created_at,
			updated_at: project.updated_at,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectContributorSummary {
	pub user_id: UserId,
	pub username: String,
}

impl From<ContributorWithUser> for ProjectContributorSummary {
	fn from(c: ContributorWithUser) -> Self {
		Self {
			user_id: c.contributor.user_id,
			username: c.username,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTitleResponse {
	pub id: IssueId,
	pub title: String,
}

impl From<IssueTitle> for IssueTitleResponse {
	fn from(t: IssueTitle) -> Self {
		Self {
			id: t.id,
			title: t.title,
		}
	}
}

/// A single project with its members and issue summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetailResponse {
	#[serde(flatten)]
	pub project: ProjectResponse,
	pub contributors: Vec<ProjectContributorSummary>,
	pub issues_count: usize,
	pub issue_titles: Vec<IssueTitleResponse>,
}

impl ProjectDetailResponse {
	pub fn new(project: Project, contributors: Vec<ContributorWithUser>, titles: Vec<IssueTitle>) -> Self {
		Self {
			project: project.into(),
			contributors: contributors.into_iter().map(Into::into).collect(),
			issues_count: titles.len(),
			issue_titles: titles.into_iter().map(Into::into).collect(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProjectsResponse {
	pub projects: Vec<ProjectResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
	pub name: String,
	pub description: String,
	#[serde(rename = "type")]
	pub project_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
	pub name: Option<String>,
	pub description: Option<String>,
	#[serde(rename = "type")]
	pub project_type: Option<String>,
}
