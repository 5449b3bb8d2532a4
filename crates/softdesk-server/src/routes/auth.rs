// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Token login, refresh and logout.

use axum::{
	extract::{rejection::JsonRejection, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use softdesk_server_api::{LoginRequest, TokenResponse, UserResponse};

use crate::{api::AppState, auth_middleware::RequireAuth, error::ServerError, services::IssuedToken};

fn token_response(issued: IssuedToken) -> TokenResponse {
	TokenResponse::bearer(
		issued.token,
		issued.session.expires_at,
		UserResponse::from(issued.user),
	)
}

#[tracing::instrument(skip(state, payload))]
pub async fn login(
	State(state): State<AppState>,
	payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
	let Json(request) = payload?;
	let issued = state.sessions.login(request).await?;
	Ok(Json(token_response(issued)))
}

#[tracing::instrument(skip(state, auth))]
pub async fn refresh(auth: RequireAuth, State(state): State<AppState>) -> Result<impl IntoResponse, ServerError> {
	let issued = state.sessions.refresh(&auth.context()).await?;
	Ok(Json(token_response(issued)))
}

#[tracing::instrument(skip(state, auth))]
pub async fn revoke(auth: RequireAuth, State(state): State<AppState>) -> Result<impl IntoResponse, ServerError> {
	state.sessions.revoke(&auth.context()).await?;
	Ok(StatusCode::NO_CONTENT)
}
