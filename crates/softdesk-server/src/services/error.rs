// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use softdesk_server_auth::{DenyReason, FieldError, ParseChoiceError, PasswordError, UserValidationError};
use softdesk_server_db::DbError;

/// Outcome of a resource service call that did not produce the entity.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
	#[error("authentication required")]
	NotAuthenticated,

	/// Insufficient role, or no role at all on the owning project. Both read
	/// the same to the caller.
	#[error("access denied")]
	Forbidden,

	#[error("{0} not found")]
	NotFound(String),

	#[error("conflict: {0}")]
	Conflict(String),

	#[error("{field}: {message}")]
	Validation { field: String, message: String },

	#[error("configuration error: {0}")]
	Configuration(String),

	#[error("internal error: {0}")]
	Internal(String),
}

impl ServiceError {
	pub fn not_found(what: impl Into<String>) -> Self {
		Self::NotFound(what.into())
	}

	pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Validation {
			field: field.into(),
			message: message.into(),
		}
	}
}

impl From<DenyReason> for ServiceError {
	fn from(reason: DenyReason) -> Self {
		match reason {
			DenyReason::NotAuthenticated => Self::NotAuthenticated,
			DenyReason::NotAuthorized | DenyReason::Concealed => Self::Forbidden,
		}
	}
}

impl From<DbError> for ServiceError {
	fn from(e: DbError) -> Self {
		match e {
			DbError::NotFound(what) => Self::NotFound(what),
			DbError::Conflict(message) => Self::Conflict(message),
			DbError::Configuration(message) => Self::Configuration(message),
			other => Self::Internal(other.to_string()),
		}
	}
}

impl From<FieldError> for ServiceError {
	fn from(e: FieldError) -> Self {
		Self::validation(e.field, e.message)
	}
}

impl From<UserValidationError> for ServiceError {
	fn from(e: UserValidationError) -> Self {
		Self::validation(e.field(), e.to_string())
	}
}

impl From<PasswordError> for ServiceError {
	fn from(e: PasswordError) -> Self {
		match e {
			PasswordError::Empty => Self::validation("password", e.to_string()),
			other => Self::Internal(other.to_string()),
		}
	}
}

/// Parse a submitted choice value, reporting failures against `field`.
pub(crate) fn parse_choice<T>(field: &str, value: &str) -> Result<T, ServiceError>
where
	T: std::str::FromStr<Err = ParseChoiceError>,
{
	value
		.parse()
		.map_err(|e: ParseChoiceError| ServiceError::validation(field, e.to_string()))
}
