// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

/// Error body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
	/// Offending request field, for validation errors.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub field: Option<String>,
}

impl ErrorResponse {
	pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			error: error.into(),
			message: message.into(),
			field: None,
		}
	}

	pub fn with_field(mut self, field: impl Into<String>) -> Self {
		self.field = Some(field.into());
		self
	}
}
