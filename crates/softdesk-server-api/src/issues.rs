// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use softdesk_server_auth::{Issue, IssueId, IssuePriority, IssueStatus, IssueTag, ProjectId, UserId};

use crate::serde_ext::deserialize_some;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueResponse {
	pub id: IssueId,
	pub project_id: ProjectId,
	pub author_id: UserId,
	pub title: String,
	pub description: String,
	pub priority: IssuePriority,
	pub tag: IssueTag,
	pub status: IssueStatus,
	pub assigned_to: Option<UserId>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl From<Issue> for IssueResponse {
	fn from(issue: Issue) -> Self {
		Self {
			id: issue.id,
			project_id: issue.project_id,
			author_id: issue.author_id,
			title: issue.title,
			description: issue.description,
			priority: issue.priority,
			tag: issue.tag,
			status: issue.status,
			assigned_to: issue.assigned_to,
			created_at: issue.created_at,
			updated_at: issue.updated_at,
		}
	}
}

/// A single issue with a summary of its comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueDetailResponse {
	#[serde(flatten)]
	pub issue: IssueResponse,
	pub comment_count: usize,
	pub comment_titles: Vec<String>,
}

impl IssueDetailResponse {
	pub fn new(issue: Issue, comment_names: Vec<String>) -> Self {
		Self {
			issue: issue.into(),
			comment_count: comment_names.len(),
			comment_titles: comment_names,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListIssuesResponse {
	pub issues: Vec<IssueResponse>,
}

/// New issue. Omitted choices take their defaults (MEDIUM, BUG, TO_DO).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIssueRequest {
	pub title: String,
	pub description: String,
	pub priority: Option<String>,
	pub tag: Option<String>,
	pub status: Option<String>,
	pub assigned_to: Option<UserId>,
}

/// Partial issue update. `"assigned_to": null` clears the assignee; an
/// absent `assigned_to` leaves it unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateIssueRequest {
	pub title: Option<String>,
	pub description: Option<String>,
	pub priority: Option<String>,
	pub tag: Option<String>,
	pub status: Option<String>,
	#[serde(default, deserialize_with = "deserialize_some")]
	pub assigned_to: Option<Option<UserId>>,
}
