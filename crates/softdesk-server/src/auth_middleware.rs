// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication middleware for Axum.
//!
//! [`auth_layer`] turns an `Authorization: Bearer sd_<token>` header into an
//! [`AuthContext`] request extension. Handlers then use [`RequireAuth`] or
//! [`OptionalAuth`] to read it.
//!
//! # Security Properties
//!
//! - Tokens are hashed with SHA-256 before lookup; raw tokens are never
//!   stored or logged.
//! - Expired sessions are ignored by the store lookup.
//! - Any failure leaves the request anonymous rather than rejecting it;
//!   handlers decide whether anonymous access is acceptable.

use axum::{
	body::Body,
	extract::{FromRequestParts, State},
	http::{request::Parts, Request, StatusCode},
	middleware::Next,
	response::{IntoResponse, Response},
	Json,
};
use softdesk_server_api::ErrorResponse;
use softdesk_server_auth::session::is_session_token;
use softdesk_server_auth::{extract_bearer_token, hash_token, AuthContext, CurrentUser};
use tracing::instrument;

use crate::api::AppState;

/// Authentication middleware that extracts auth context from requests.
#[instrument(
	name = "auth_layer",
	skip(state, request, next),
	fields(user_id = tracing::field::Empty)
)]
pub async fn auth_layer(State(state): State<AppState>, mut request: Request<Body>, next: Next) -> Response {
	let auth_ctx = match extract_bearer_token(request.headers()) {
		Some(token) => authenticate_bearer(&state, &token)
			.await
			.unwrap_or_else(AuthContext::unauthenticated),
		None => AuthContext::unauthenticated(),
	};

	if let Some(user) = auth_ctx.user() {
		tracing::Span::current().record("user_id", tracing::field::display(&user.id));
	}
	request.extensions_mut().insert(auth_ctx);
	next.run(request).await
}

/// Resolve a bearer token to its session and user.
#[instrument(skip_all, fields(session_id = tracing::field::Empty))]
async fn authenticate_bearer(state: &AppState, token: &str) -> Option<AuthContext> {
	if !is_session_token(token) {
		tracing::debug!("Unknown bearer token type");
		return None;
	}

	let session = match state.session_repo.get_session_by_token_hash(&hash_token(token)).await {
		Ok(Some(session)) => session,
		Ok(None) => {
			tracing::debug!("Session not found for token hash");
			return None;
		}
		Err(e) => {
			tracing::error!(error = %e, "Failed to look up session");
			return None;
		}
	};
	tracing::Span::current().record("session_id", tracing::field::display(&session.id));

	let user = match state.user_repo.get_user_by_id(&session.user_id).await {
		Ok(Some(user)) => user,
		Ok(None) => {
			tracing::warn!(user_id = %session.user_id, "User not found for valid session");
			return None;
		}
		Err(e) => {
			tracing::error!(error = %e, "Failed to look up user");
			return None;
		}
	};

	Some(AuthContext::authenticated(CurrentUser::from_session(&user, session.id)))
}

fn auth_context(parts: &Parts) -> AuthContext {
	parts
		.extensions
		.get::<AuthContext>()
		.cloned()
		.unwrap_or_else(AuthContext::unauthenticated)
}

/// Extractor that rejects anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub CurrentUser);

impl RequireAuth {
	/// The request's auth context, for handing to services.
	pub fn context(&self) -> AuthContext {
		AuthContext::authenticated(self.0.clone())
	}
}

impl<S> FromRequestParts<S> for RequireAuth
where
	S: Send + Sync,
{
	type Rejection = Response;

	#[instrument(name = "RequireAuth::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		match auth_context(parts).into_user() {
			Some(user) => {
				tracing::debug!(user_id = %user.id, "Authentication required: success");
				Ok(RequireAuth(user))
			}
			None => {
				tracing::debug!("Authentication required: no valid credentials");
				let response = (
					StatusCode::UNAUTHORIZED,
					Json(ErrorResponse::new("unauthorized", "Authentication required")),
				);
				Err(response.into_response())
			}
		}
	}
}

/// Extractor for optional authentication. Always succeeds.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<CurrentUser>);

impl OptionalAuth {
	pub fn context(&self) -> AuthContext {
		AuthContext::from(self.0.clone())
	}
}

impl<S> FromRequestParts<S> for OptionalAuth
where
	S: Send + Sync,
{
	type Rejection = std::convert::Infallible;

	#[instrument(name = "OptionalAuth::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let user = auth_context(parts).into_user();
		match &user {
			Some(user) => tracing::debug!(user_id = %user.id, "Optional auth: authenticated"),
			None => tracing::debug!("Optional auth: unauthenticated"),
		}
		Ok(OptionalAuth(user))
	}
}
