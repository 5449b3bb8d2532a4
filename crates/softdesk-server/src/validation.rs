// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared validation utilities for API handlers.
//!
//! Path identifiers arrive as strings; a malformed one is a 400, never a 404.

use softdesk_server_auth::{CommentId, IssueId, ProjectId, UserId};
use uuid::Uuid;

/// Error type for ID parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParseError {
	pub error: String,
	pub message: String,
}

impl IdParseError {
	fn invalid(what: &str) -> Self {
		Self {
			error: "invalid_id".to_string(),
			message: format!("Invalid {what} ID"),
		}
	}
}

fn parse_uuid(id_str: &str, what: &str) -> Result<Uuid, IdParseError> {
	Uuid::parse_str(id_str).map_err(|_| IdParseError::invalid(what))
}

pub fn parse_project_id(id_str: &str) -> Result<ProjectId, IdParseError> {
	parse_uuid(id_str, "project").map(ProjectId::new)
}

pub fn parse_issue_id(id_str: &str) -> Result<IssueId, IdParseError> {
	parse_uuid(id_str, "issue").map(IssueId::new)
}

pub fn parse_comment_id(id_str: &str) -> Result<CommentId, IdParseError> {
	parse_uuid(id_str, "comment").map(CommentId::new)
}

pub fn parse_user_id(id_str: &str) -> Result<UserId, IdParseError> {
	parse_uuid(id_str, "user").map(UserId::new)
}
