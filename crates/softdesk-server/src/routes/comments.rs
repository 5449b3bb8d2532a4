// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Comment HTTP handlers.

use axum::{
	extract::{rejection::JsonRejection, Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use softdesk_server_api::{
	CommentResponse, CreateCommentRequest, ListCommentsResponse, UpdateCommentRequest,
};

use crate::{
	api::AppState,
	auth_middleware::RequireAuth,
	error::ServerError,
	validation::{parse_comment_id, parse_issue_id, parse_project_id},
};

#[tracing::instrument(skip(state, auth))]
pub async fn list_comments(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path((project_id, issue_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let issue_id = parse_issue_id(&issue_id)?;
	let comments = state
		.comments
		.list(&auth.context(), project_id, issue_id)
		.await?;
	Ok(Json(ListCommentsResponse {
		comments: comments.into_iter().map(CommentResponse::from).collect(),
	}))
}

#[tracing::instrument(skip(state, auth, payload))]
pub async fn create_comment(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path((project_id, issue_id)): Path<(String, String)>,
	payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let issue_id = parse_issue_id(&issue_id)?;
	let Json(request) = payload?;
	let comment = state
		.comments
		.create(&auth.context(), project_id, issue_id, request)
		.await?;
	Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

#[tracing::instrument(skip(state, auth))]
pub async fn get_comment(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path((project_id, issue_id, comment_id)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let issue_id = parse_issue_id(&issue_id)?;
	let comment_id = parse_comment_id(&comment_id)?;
	let comment = state
		.comments
		.get(&auth.context(), project_id, issue_id, comment_id)
		.await?;
	Ok(Json(CommentResponse::from(comment)))
}

#[tracing::instrument(skip(state, auth, payload))]
pub async fn update_comment(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path((project_id, issue_id, comment_id)): Path<(String, String, String)>,
	payload: Result<Json<UpdateCommentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let issue_id = parse_issue_id(&issue_id)?;
	let comment_id = parse_comment_id(&comment_id)?;
	let Json(request) = payload?;
	let comment = state
		.comments
		.update(&auth.context(), project_id, issue_id, comment_id, request)
		.await?;
	Ok(Json(CommentResponse::from(comment)))
}

#[tracing::instrument(skip(state, auth))]
pub async fn delete_comment(
	auth: RequireAuth,
	State(state): State<AppState>,
	Path((project_id, issue_id, comment_id)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = parse_project_id(&project_id)?;
	let issue_id = parse_issue_id(&issue_id)?;
	let comment_id = parse_comment_id(&comment_id)?;
	state
		.comments
		.delete(&auth.context(), project_id, issue_id, comment_id)
		.await?;
	Ok(StatusCode::NO_CONTENT)
}
