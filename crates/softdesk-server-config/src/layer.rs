// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::Deserialize;

use crate::sections::{AuthConfigLayer, DatabaseConfigLayer, HttpConfigLayer, LoggingConfigLayer};

/// What one source (defaults, `softdesk.toml`, environment) contributes.
/// Missing tables and missing keys both mean "leave the earlier value".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub auth: Option<AuthConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl ServerConfigLayer {
	/// Overlay `other` on top of `self`.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		overlay(&mut self.http, other.http, HttpConfigLayer::merge);
		overlay(&mut self.database, other.database, DatabaseConfigLayer::merge);
		overlay(&mut self.auth, other.auth, AuthConfigLayer::merge);
		overlay(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn overlay<T>(base: &mut Option<T>, top: Option<T>, merge: impl FnOnce(&mut T, T)) {
	let Some(top) = top else {
		return;
	};
	match base {
		Some(existing) => merge(existing, top),
		None => *base = Some(top),
	}
}
