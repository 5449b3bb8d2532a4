// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Projects and their contributor memberships.
//!
//! This module provides:
//! - [`Project`] - the root of the tracker hierarchy, owned by one identity
//! - [`Contributor`] - a membership edge granting an identity access to a project

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{require_text, FieldError};
use crate::types::{ContributorId, ProjectId, ProjectType, UserId};

/// Maximum length of a project name.
pub const PROJECT_NAME_MAX_LEN: usize = 255;

/// A project tracked by the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
	pub id: ProjectId,
	pub name: String,
	pub description: String,
	pub project_type: ProjectType,
	/// Set to the creator; changed only when the owner's account is deleted.
	pub owner_id: UserId,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Project {
	/// Creates a new project owned by `owner_id`.
	pub fn new(
		owner_id: UserId,
		name: impl Into<String>,
		description: impl Into<String>,
		project_type: ProjectType,
	) -> Self {
		let now = Utc::now();
		Self {
			id: ProjectId::generate(),
			name: name.into(),
			description: description.into(),
			project_type,
			owner_id,
			created_at: now,
			updated_at: now,
		}
	}

	/// Returns true if `user_id` owns this project.
	pub fn is_owned_by(&self, user_id: UserId) -> bool {
		self.owner_id == user_id
	}

	/// Check the free-text fields.
	pub fn validate(&self) -> Result<(), FieldError> {
		validate_project_fields(Some(&self.name), Some(&self.description))
	}
}

/// Validate the optional name/description of a create or update payload.
pub fn validate_project_fields(
	name: Option<&str>,
	description: Option<&str>,
) -> Result<(), FieldError> {
	if let Some(name) = name {
		require_text("name", name, Some(PROJECT_NAME_MAX_LEN))?;
	}
	if let Some(description) = description {
		require_text("description", description, None)?;
	}
	Ok(())
}

/// An identity's membership in a project.
///
/// At most one edge exists per (project, user). The project owner never has
/// an edge of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
	pub id: ContributorId,
	pub project_id: ProjectId,
	pub user_id: UserId,
	pub created_at: DateTime<Utc>,
}

impl Contributor {
	pub fn new(project_id: ProjectId, user_id: UserId) -> Self {
		Self {
			id: ContributorId::generate(),
			project_id,
			user_id,
			created_at: Utc::now(),
		}
	}
}
