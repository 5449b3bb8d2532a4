// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use softdesk_server_auth::{User, UserId};

/// A user account in API responses. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
	pub id: UserId,
	pub username: String,
	pub date_of_birth: NaiveDate,
	pub can_be_contacted: bool,
	pub can_data_be_shared: bool,
	pub is_admin: bool,
	pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
	fn from(user: User) -> Self {
		Self {
			id: user.id,
			username: user.username,
			date_of_birth: user.date_of_birth,
			can_be_contacted: user.can_be_contacted,
			can_data_be_shared: user.can_data_be_shared,
			is_admin: user.is_admin,
			created_at: user.created_at,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
	pub users: Vec<UserResponse>,
}

/// Self-service registration. `date_of_birth` is `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
	pub username: String,
	pub password: String,
	pub date_of_birth: NaiveDate,
	#[serde(default)]
	pub can_be_contacted: bool,
	#[serde(default)]
	pub can_data_be_shared: bool,
}

/// Profile update. The username and admin flag cannot be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
	pub password: Option<String>,
	pub date_of_birth: Option<NaiveDate>,
	pub can_be_contacted: Option<bool>,
	pub can_data_be_shared: Option<bool>,
}
