// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Token login, refresh and logout.
//!
//! Tokens are opaque `sd_` strings handed out once; only their SHA-256 hash
//! is stored. Refreshing revokes the presented token and issues a new one.

use std::sync::Arc;

use softdesk_server_api::LoginRequest;
use softdesk_server_auth::{generate_session_token, verify_password, AuthContext, Session, User};
use softdesk_server_config::AuthConfig;
use softdesk_server_db::{SessionStore, UserStore};

use super::error::ServiceError;

/// A token that has just been issued, with the session and user it maps to.
#[derive(Debug, Clone)]
pub struct IssuedToken {
	pub token: String,
	pub session: Session,
	pub user: User,
}

#[derive(Clone)]
pub struct SessionService {
	users: Arc<dyn UserStore>,
	sessions: Arc<dyn SessionStore>,
	config: AuthConfig,
}

impl SessionService {
	pub fn new(users: Arc<dyn UserStore>, sessions: Arc<dyn SessionStore>, config: AuthConfig) -> Self {
		Self {
			users,
			sessions,
			config,
		}
	}

	/// Exchange a username and password for a bearer token.
	///
	/// Unknown usernames and wrong passwords are indistinguishable.
	#[tracing::instrument(skip(self, request), fields(username = %request.username))]
	pub async fn login(&self, request: LoginRequest) -> Result<IssuedToken, ServiceError> {
		let Some(user) = self.users.get_user_by_username(&request.username).await? else {
			tracing::debug!("login failed: unknown username");
			return Err(ServiceError::NotAuthenticated);
		};
		if !verify_password(&request.password, &user.password_hash)? {
			tracing::debug!(user_id = %user.id, "login failed: wrong password");
			return Err(ServiceError::NotAuthenticated);
		}
		self.issue(user).await
	}

	/// Revoke the presented token and issue a fresh one.
	#[tracing::instrument(skip(self, auth))]
	pub async fn refresh(&self, auth: &AuthContext) -> Result<IssuedToken, ServiceError> {
		let current = auth.require_user().map_err(|_| ServiceError::NotAuthenticated)?;
		let user = self
			.users
			.get_user_by_id(&current.id)
			.await?
			.ok_or(ServiceError::NotAuthenticated)?;
		self.sessions.delete_session(&current.session_id).await?;
		self.issue(user).await
	}

	/// Revoke the presented token.
	#[tracing::instrument(skip(self, auth))]
	pub async fn revoke(&self, auth: &AuthContext) -> Result<(), ServiceError> {
		let current = auth.require_user().map_err(|_| ServiceError::NotAuthenticated)?;
		self.sessions.delete_session(&current.session_id).await?;
		tracing::debug!(user_id = %current.id, session_id = %current.session_id, "session revoked");
		Ok(())
	}

	async fn issue(&self, user: User) -> Result<IssuedToken, ServiceError> {
		let (token, token_hash) = generate_session_token();
		let ttl_hours = self.config.session_ttl_hours;
		let session = Session::with_ttl_hours(user.id, token_hash, ttl_hours).ok_or_else(|| {
			ServiceError::Internal(format!("session lifetime of {ttl_hours} hours is out of range"))
		})?;
		self.sessions.create_session(&session).await?;
		tracing::debug!(user_id = %user.id, session_id = %session.id, "session issued");
		Ok(IssuedToken { token, session, user })
	}
}
