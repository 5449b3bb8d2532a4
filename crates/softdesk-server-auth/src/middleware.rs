// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request authentication context.
//!
//! This module provides:
//! - [`CurrentUser`] - the authenticated identity behind a request
//! - [`AuthContext`] - auth state handed to the resource services
//! - [`extract_bearer_token`] - pulls the token out of the `Authorization` header
//!
//! # Authentication Flow
//!
//! ```text
//! Request → Bearer sd_<token> → SHA-256 → sessions lookup → AuthContext
//!                                              │
//!                                              └── missing/expired → anonymous
//! ```
//!
//! Token values are never logged.

use http::header::AUTHORIZATION;
use http::HeaderMap;
use tracing::instrument;

use crate::{SessionId, User, UserId};

/// The account a bearer token resolved to, pinned to the session that
/// token belongs to so refresh and logout can revoke exactly that one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
	pub id: UserId,
	pub username: String,
	pub is_admin: bool,
	pub session_id: SessionId,
}

impl CurrentUser {
	pub fn from_session(user: &User, session_id: SessionId) -> Self {
		Self {
			id: user.id,
			username: user.username.clone(),
			is_admin: user.is_admin,
			session_id,
		}
	}
}

/// Who is making the request, as seen by the resource services. An empty
/// context is an anonymous caller.
#[derive(Debug, Clone, Default)]
pub struct AuthContext(Option<CurrentUser>);

impl AuthContext {
	pub fn unauthenticated() -> Self {
		Self(None)
	}

	pub fn authenticated(current_user: CurrentUser) -> Self {
		Self(Some(current_user))
	}

	pub fn is_authenticated(&self) -> bool {
		self.0.is_some()
	}

	pub fn user(&self) -> Option<&CurrentUser> {
		self.0.as_ref()
	}

	pub fn into_user(self) -> Option<CurrentUser> {
		self.0
	}

	/// The current user, or [`AuthRequired`] for anonymous callers.
	pub fn require_user(&self) -> Result<&CurrentUser, AuthRequired> {
		self.0.as_ref().ok_or(AuthRequired)
	}
}

impl From<Option<CurrentUser>> for AuthContext {
	fn from(current_user: Option<CurrentUser>) -> Self {
		Self(current_user)
	}
}

#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("authentication required")]
pub struct AuthRequired;

/// Extract the bearer token from the `Authorization` header.
///
/// Returns `None` when the header is absent, not valid UTF-8, or not a
/// `Bearer` credential.
#[instrument(level = "trace", skip_all)]
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
	let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;
	let token = auth_str.strip_prefix("Bearer ")?.trim();
	(!token.is_empty()).then(|| token.to_owned())
}
