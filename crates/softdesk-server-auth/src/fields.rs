// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Length checks for free-text fields on projects, issues and comments.

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
	pub field: &'static str,
	pub message: String,
}

impl FieldError {
	pub fn new(field: &'static str, message: impl Into<String>) -> Self {
		Self {
			field,
			message: message.into(),
		}
	}
}

/// Require `value` to be non-blank and, when `max_len` is set, at most that many characters.
pub fn require_text(field: &'static str, value: &str, max_len: Option<usize>) -> Result<(), FieldError> {
	if value.trim().is_empty() {
		return Err(FieldError::new(field, "must not be blank"));
	}
	if let Some(max) = max_len {
		if value.chars().count() > max {
			return Err(FieldError::new(
				field,
				format!("must be at most {max} characters"),
			));
		}
	}
	Ok(())
}
