// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User account HTTP handlers.
//!
//! Registration is the only endpoint in the API open to anonymous callers.
//! Deleting an account runs the ownership handover before the row goes.

use axum::{
	extract::{rejection::JsonRejection, Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use softdesk_server_api::{ListUsersResponse, RegisterRequest, UpdateUserRequest, UserResponse};

use crate::{
	api::AppState,
	auth_middleware::{OptionalAuth, RequireAuth},
	error::ServerError,
	validation::parse_user_id,
};

#[tracing::instrument(skip(state, auth))]
pub async fn list_users(auth: RequireAuth, State(state): State<AppState>) -> Result<impl IntoResponse, ServerError> {
	let users = state.users.list(&auth.context()).await?;
	Ok(Json(ListUsersResponse {
		users: users.into_iter().map(UserResponse::from).collect(),
	}))
}

#[tracing::instrument(skip(state, auth, payload))]
pub async fn register(
	auth: OptionalAuth,
	State(state): State<AppState>,
	payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
	let Json(request) = payload?;
	let user = state.users.register(&auth.context(), request).await?;
	Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[tracing::instrument(skip(state, auth))]
pub async fn get_user(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let user_id = parse_user_id(&user_id)?;
	let user = state.users.get(&auth.context(), user_id).await?;
	Ok(Json(UserResponse::from(user)))
}

#[tracing::instrument(skip(state, auth, payload))]
pub async fn update_user(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path(user_id): Path<String>,
	payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
	let user_id = parse_user_id(&user_id)?;
	let Json(request) = payload?;
	let user = state.users.update(&auth.context(), user_id, request).await?;
	Ok(Json(UserResponse::from(user)))
}

#[tracing::instrument(skip(state, auth))]
pub async fn delete_user(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let user_id = parse_user_id(&user_id)?;
	let summary = state.users.delete_identity(&auth.context(), user_id).await?;
	tracing::info!(
		%user_id,
		fallback_admin_id = ?summary.fallback_admin_id,
		projects = summary.projects_reassigned,
		issues = summary.issues_reassigned,
		comments = summary.comments_reassigned,
		"account deleted"
	);
	Ok(StatusCode::NO_CONTENT)
}
