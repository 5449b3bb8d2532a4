// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Issues filed against a project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{require_text, FieldError};
use crate::types::{IssueId, IssuePriority, IssueStatus, IssueTag, ProjectId, UserId};

/// Maximum length of an issue title.
pub const ISSUE_TITLE_MAX_LEN: usize = 255;

/// A unit of work inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
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

impl Issue {
	/// Creates an issue with default priority, tag and status.
	pub fn new(
		project_id: ProjectId,
		author_id: UserId,
		title: impl Into<String>,
		description: impl Into<String>,
	) -> Self {
		let now = Utc::now();
		Self {
			id: IssueId::generate(),
			project_id,
			author_id,
			title: title.into(),
			description: description.into(),
			priority: IssuePriority::default(),
			tag: IssueTag::default(),
			status: IssueStatus::default(),
			assigned_to: None,
			created_at: now,
			updated_at: now,
		}
	}

	pub fn is_authored_by(&self, user_id: UserId) -> bool {
		self.author_id == user_id
	}
}

/// Validate the optional title/description of a create or update payload.
pub fn validate_issue_fields(title: Option<&str>, description: Option<&str>) -> Result<(), FieldError> {
	if let Some(title) = title {
		require_text("title", title, Some(ISSUE_TITLE_MAX_LEN))?;
	}
	if let Some(description) = description {
		require_text("description", description, None)?;
	}
	Ok(())
}
