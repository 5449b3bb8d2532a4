// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Issue HTTP handlers.

use axum::{
	extract::{rejection::JsonRejection, Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use softdesk_server_api::{
	CreateIssueRequest, IssueDetailResponse, IssueResponse, ListIssuesResponse, UpdateIssueRequest,
};

use crate::{
	api::AppState,
	auth_middleware::RequireAuth,
	error::ServerError,
	validation::{parse_issue_id, parse_project_id},
};

#[tracing::instrument(skip(state, auth))]
pub async fn list_issues(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let issues = state.issues.list(&auth.context(), project_id).await?;
	Ok(Json(ListIssuesResponse {
		issues: issues.into_iter().map(IssueResponse::from).collect(),
	}))
}

#[tracing::instrument(skip(state, auth, payload))]
pub async fn create_issue(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path(project_id): Path<String>,
	payload: Result<Json<CreateIssueRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let Json(request) = payload?;
	let issue = state.issues.create(&auth.context(), project_id, request).await?;
	Ok((StatusCode::CREATED, Json(IssueResponse::from(issue))))
}

#[tracing::instrument(skip(state, auth))]
pub async fn get_issue(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path((project_id, issue_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let issue_id = parse_issue_id(&issue_id)?;
	let detail = state.issues.get(&auth.context(), project_id, issue_id).await?;
	Ok(Json(IssueDetailResponse::new(detail.issue, detail.comment_names)))
}

#[tracing::instrument(skip(state, auth, payload))]
pub async fn update_issue(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path((project_id, issue_id)): Path<(String, String)>,
	payload: Result<Json<UpdateIssueRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let issue_id = parse_issue_id(&issue_id)?;
	let Json(request) = payload?;
	let issue = state
		.issues
		.update(&auth.context(), project_id, issue_id, request)
		.await?;
	Ok(Json(IssueResponse::from(issue)))
}

#[tracing::instrument(skip(state, auth))]
pub async fn delete_issue(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path((project_id, issue_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let issue_id = parse_issue_id(&issue_id)?;
	state
		.issues
		.delete(&auth.context(), project_id, issue_id)
		.await?;
	Ok(StatusCode::NO_CONTENT)
}
