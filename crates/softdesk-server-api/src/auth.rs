// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::users::UserResponse;

/// Credentials for `POST /api/auth/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
	pub username: String,
	pub password: String,
}

/// A freshly issued bearer token. The token is only ever shown here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
	pub token: String,
	pub token_type: String,
	pub expires_at: DateTime<Utc>,
	pub user: UserResponse,
}

impl TokenResponse {
	pub fn bearer(token: String, expires_at: DateTime<Utc>, user: UserResponse) -> Self {
		Self {
			token,
			token_type: "Bearer".to_string(),
			expires_at,
			user,
		}
	}
}
