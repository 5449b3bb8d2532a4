// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use softdesk_server_auth::{Comment, CommentId, IssueId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
	pub id: CommentId,
	pub issue_id: IssueId,
	pub author_id: UserId,
	pub name: String,
	pub description: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
	fn from(comment: Comment) -> Self {
		Self {
			id: comment.id,
			issue_id: comment.issue_id,
			author_id: comment.author_id,
			name: comment.name,
			description: comment.description,
			created_at: comment.created_at,
			updated_at: comment.updated_at,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCommentsResponse {
	pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
	pub name: String,
	pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCommentRequest {
	pub name: Option<String>,
	pub description: Option<String>,
}
