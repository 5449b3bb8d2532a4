// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

/// Request spans from the trace layer are useful while the API is young.
const DEFAULT_FILTER: &str = "info,tower_http::trace=debug";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfigLayer {
	pub level: Option<String>,
	pub json: Option<bool>,
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: Self) {
		self.level = other.level.or(self.level.take());
		self.json = other.json.or(self.json);
	}

	pub fn finalize(self) -> LoggingConfig {
		LoggingConfig {
			level: self.level.unwrap_or_else(|| DEFAULT_FILTER.to_owned()),
			json: self.json.unwrap_or_default(),
		}
	}
}

/// Log filter directive and output format. `RUST_LOG` takes precedence over
/// `level` when set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
	pub level: String,
	/// Emit one JSON object per event instead of human-readable lines.
	pub json: bool,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		LoggingConfigLayer::default().finalize()
	}
}
