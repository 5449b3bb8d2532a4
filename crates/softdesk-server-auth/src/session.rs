// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Login sessions backed by opaque bearer tokens.
//!
//! The plaintext token (`sd_` followed by 64 hex characters) is handed to the
//! client exactly once. Only its SHA-256 digest is persisted, so a leaked
//! database does not yield usable credentials.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::{SessionId, UserId};

/// Prefix carried by every session token.
pub const SESSION_TOKEN_PREFIX: &str = "sd_";

/// Default session lifetime in hours.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// A persisted login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	pub id: SessionId,
	pub user_id: UserId,
	#[serde(skip_serializing, default)]
	pub token_hash: String,
	pub created_at: DateTime<Utc>,
	pub expires_at: DateTime<Utc>,
}

impl Session {
	/// Create a session for `user_id` identified by `token_hash`, valid for `ttl`.
	pub fn new(user_id: UserId, token_hash: String, ttl: Duration) -> Self {
		let now = Utc::now();
		Self {
			id: SessionId::generate(),
			user_id,
			token_hash,
			created_at: now,
			expires_at: now + ttl,
		}
	}

	/// Create a session lasting `ttl_hours`. Returns `None` when the expiry
	/// falls outside the representable date range.
	pub fn with_ttl_hours(user_id: UserId, token_hash: String, ttl_hours: i64) -> Option<Self> {
		let ttl = Duration::try_hours(ttl_hours)?;
		let now = Utc::now();
		Some(Self {
			id: SessionId::generate(),
			user_id,
			token_hash,
			created_at: now,
			expires_at: now.checked_add_signed(ttl)?,
		})
	}

	/// Returns true once `expires_at` has passed.
	pub fn is_expired(&self) -> bool {
		Utc::now() >= self.expires_at
	}
}

/// Generate a fresh session token and its storage hash.
///
/// Returns `(plaintext_token, token_hash)`.
pub fn generate_session_token() -> (String, String) {
	let mut bytes = [0u8; 32];
	rand::thread_rng().fill_bytes(&mut bytes);
	let token = format!("{SESSION_TOKEN_PREFIX}{}", hex::encode(bytes));
	let hash = hash_token(&token);
	(token, hash)
}

/// SHA-256 hex digest of a token, as stored in the sessions table.
pub fn hash_token(token: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(token.as_bytes());
	hex::encode(hasher.finalize())
}

/// Check if a bearer token looks like a session token.
pub fn is_session_token(token: &str) -> bool {
	token.starts_with(SESSION_TOKEN_PREFIX) && token.len() > SESSION_TOKEN_PREFIX.len()
}
