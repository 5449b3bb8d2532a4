// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Contributor HTTP handlers. Contributors are addressed by their user id.

use axum::{
	extract::{rejection::JsonRejection, Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use softdesk_server_api::{AddContributorRequest, ContributorResponse, ListContributorsResponse};

use crate::{
	api::AppState,
	auth_middleware::RequireAuth,
	error::ServerError,
	validation::{parse_project_id, parse_user_id},
};

#[tracing::instrument(skip(state, auth))]
pub async fn list_contributors(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let contributors = state.contributors.list(&auth.context(), project_id).await?;
	Ok(Json(ListContributorsResponse {
		contributors: contributors.into_iter().map(ContributorResponse::from).collect(),
	}))
}

#[tracing::instrument(skip(state, auth, payload))]
pub async fn add_contributor(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path(project_id): Path<String>,
	payload: Result<Json<AddContributorRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let Json(request) = payload?;
	let contributor = state.contributors.add(&auth.context(), project_id, request).await?;
	Ok((StatusCode::CREATED, Json(ContributorResponse::from(contributor))))
}

#[tracing::instrument(skip(state, auth))]
pub async fn get_contributor(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path((project_id, user_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let user_id = parse_user_id(&user_id)?;
	let contributor = state
		.contributors
		.get(&auth.context(), project_id, user_id)
		.await?;
	Ok(Json(ContributorResponse::from(contributor)))
}

#[tracing::instrument(skip(state, auth))]
pub async fn remove_contributor(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path((project_id, user_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let user_id = parse_user_id(&user_id)?;
	state
		.contributors
		.remove(&auth.context(), project_id, user_id)
		.await?;
	Ok(StatusCode::NO_CONTENT)
}
