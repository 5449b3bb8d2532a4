// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project HTTP handlers.
//!
//! - `GET /api/projects`: projects the caller owns or contributes to
//! - `POST /api/projects`: create a project owned by the caller
//! - `GET /api/projects/{project_id}`: detail view (members only)
//! - `PATCH /api/projects/{project_id}`: owner only
//! - `DELETE /api/projects/{project_id}`: owner only, cascades

use axum::{
	extract::{rejection::JsonRejection, Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use softdesk_server_api::{
	CreateProjectRequest, ListProjectsResponse, ProjectDetailResponse, ProjectResponse,
	UpdateProjectRequest,
};

use crate::{api::AppState, auth_middleware::RequireAuth, error::ServerError, validation::parse_project_id};

#[tracing::instrument(skip(state, auth))]
pub async fn list_projects(auth: RequireAuth, State(state): State<AppState>) -> Result<impl IntoResponse, ServerError> {
	let projects = state.projects.list(&auth.context()).await?;
	Ok(Json(ListProjectsResponse {
		projects: projects.into_iter().map(ProjectResponse::from).collect(),
	}))
}

#[tracing::instrument(skip(state, auth, payload))]
pub async fn create_project(
	auth: RequireAuth,
	State(state): State<AppState>,
	payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
	let Json(request) = payload?;
	let project = state.projects.create(&auth.context(), request).await?;
	Ok((StatusCode::CREATED, Json(ProjectResponse::from(project))))
}

#[tracing::instrument(skip(state, auth))]
pub async fn get_project(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let detail = state.projects.get(&auth.context(), project_id).await?;
	Ok(Json(ProjectDetailResponse::new(
		detail.project,
		detail.contributors,
		detail.issue_titles,
	)))
}

#[tracing::instrument(skip(state, auth, payload))]
pub async fn update_project(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path(project_id): Path<String>,
	payload: Result<Json<UpdateProjectRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let Json(request) = payload?;
	let project = state.projects.update(&auth.context(), project_id, request).await?;
	Ok(Json(ProjectResponse::from(project)))
}

#[tracing::instrument(skip(state, auth))]
pub async fn delete_project(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	state.projects.delete(&auth.context(), project_id).await?;
	Ok(StatusCode::NO_CONTENT)
}
