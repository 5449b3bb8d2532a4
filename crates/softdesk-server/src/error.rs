// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	extract::rejection::JsonRejection,
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use softdesk_server_api::ErrorResponse;

use crate::services::ServiceError;
use crate::validation::IdParseError;

/// Errors a handler can return.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error(transparent)]
	Service(#[from] ServiceError),

	/// Malformed path identifier.
	#[error("Invalid id: {}", .0.message)]
	InvalidId(IdParseError),

	/// Body was not valid JSON for the endpoint.
	#[error("Invalid request: {0}")]
	BadRequest(String),
}

impl From<IdParseError> for ServerError {
	fn from(e: IdParseError) -> Self {
		Self::InvalidId(e)
	}
}

impl From<JsonRejection> for ServerError {
	fn from(rejection: JsonRejection) -> Self {
		Self::BadRequest(rejection.body_text())
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, body) = match self {
			ServerError::InvalidId(e) => (StatusCode::BAD_REQUEST, ErrorResponse::new(e.error, e.message)),
			ServerError::BadRequest(message) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse::new("bad_request", message),
			),
			ServerError::Service(e) => match e {
				ServiceError::NotAuthenticated => (
					StatusCode::UNAUTHORIZED,
					ErrorResponse::new("unauthorized", "Authentication required"),
				),
				ServiceError::Forbidden => (
					StatusCode::FORBIDDEN,
					ErrorResponse::new("forbidden", "You do not have permission to perform this action"),
				),
				ServiceError::NotFound(what) => (
					StatusCode::NOT_FOUND,
					ErrorResponse::new("not_found", format!("{} not found", capitalize(&what))),
				),
				ServiceError::Conflict(message) => (StatusCode::CONFLICT, ErrorResponse::new("conflict", message)),
				ServiceError::Validation { field, message } => (
					StatusCode::BAD_REQUEST,
					ErrorResponse::new("validation_error", message).with_field(field),
				),
				ServiceError::Configuration(message) => {
					tracing::error!(error = %message, "configuration error");
					(
						StatusCode::INTERNAL_SERVER_ERROR,
						ErrorResponse::new("configuration_error", "The server is misconfigured"),
					)
				}
				ServiceError::Internal(message) => {
					tracing::error!(error = %message, "internal error");
					(
						StatusCode::INTERNAL_SERVER_ERROR,
						ErrorResponse::new("internal_error", "An internal error occurred"),
					)
				}
			},
		};

		(status, Json(body)).into_response()
	}
}

fn capitalize(what: &str) -> String {
	let mut chars = what.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
