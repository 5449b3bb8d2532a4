// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Comments posted on issues.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{require_text, FieldError};
use crate::types::{CommentId, IssueId, UserId};

/// Maximum length of a comment name.
pub const COMMENT_NAME_MAX_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
	pub id: CommentId,
	pub issue_id: IssueId,
	pub author_id: UserId,
	pub name: String,
	pub description: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Comment {
	pub fn new(
		issue_id: IssueId,
		author_id: UserId,
		name: impl Into<String>,
		description: impl Into<String>,
	) -> Self {
		let now = Utc::now();
		Self {
			id: CommentId::generate(),
			issue_id,
			author_id,
			name: name.into(),
			description: description.into(),
			created_at: now,
			updated_at: now,
		}
	}

	pub fn is_authored_by(&self, user_id: UserId) -> bool {
		self.author_id == user_id
	}
}

/// Validate the optional name/description of a create or update payload.
pub fn validate_comment_fields(name: Option<&str>, description: Option<&str>) -> Result<(), FieldError> {
	if let Some(name) = name {
		require_text("name", name, Some(COMMENT_NAME_MAX_LEN))?;
	}
	if let Some(description) = description {
		require_text("description", description, None)?;
	}
	Ok(())
}
