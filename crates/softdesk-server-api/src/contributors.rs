// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use softdesk_server_auth::{ContributorId, ProjectId, UserId};
use softdesk_server_db::ContributorWithUser;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributorResponse {
	pub id: ContributorId,
	pub project_id: ProjectId,
	pub user_id: UserId,
	pub username: String,
	pub created_at: DateTime<Utc>,
}

impl From<ContributorWithUser> for ContributorResponse {
	fn from(c: ContributorWithUser) -> Self {
		Self {
			id: c.contributor.id,
			project_id: c.contributor.project_id,
			user_id: c.contributor.user_id,
			username: c.username,
			created_at: c.contributor.created_at,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListContributorsResponse {
	pub contributors: Vec<ContributorResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddContributorRequest {
	pub user_id: UserId,
}
