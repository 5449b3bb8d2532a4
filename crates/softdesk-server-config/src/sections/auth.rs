// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication and registration configuration.

use serde::Deserialize;

const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
const DEFAULT_MIN_REGISTRATION_AGE_YEARS: u32 = 15;

/// Authentication configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct AuthConfig {
	/// Lifetime of a login token.
	pub session_ttl_hours: i64,
	/// Registrations from users younger than this are rejected.
	pub min_registration_age_years: u32,
	pub signups_disabled: bool,
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
			min_registration_age_years: DEFAULT_MIN_REGISTRATION_AGE_YEARS,
			signups_disabled: false,
		}
	}
}

/// Authentication configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub session_ttl_hours: Option<i64>,
	#[serde(default)]
	pub min_registration_age_years: Option<u32>,
	#[serde(default)]
	pub signups_disabled: Option<bool>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		self.session_ttl_hours = other.session_ttl_hours.or(self.session_ttl_hours);
		self.min_registration_age_years = other
			.min_registration_age_years
			.or(self.min_registration_age_years);
		self.signups_disabled = other.signups_disabled.or(self.signups_disabled);
	}

	pub fn finalize(self) -> AuthConfig {
		AuthConfig {
			session_ttl_hours: self.session_ttl_hours.unwrap_or(DEFAULT_SESSION_TTL_HOURS),
			min_registration_age_years: self
				.min_registration_age_years
				.unwrap_or(DEFAULT_MIN_REGISTRATION_AGE_YEARS),
			signups_disabled: self.signups_disabled.unwrap_or(false),
		}
	}
}
