// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Password hashing with Argon2id.
//!
//! Release builds use `Argon2::default()` (19 MiB, 2 iterations). Test builds
//! swap in minimal parameters so the suites stay fast; those parameters must
//! never reach production.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
#[cfg(test)]
use argon2::{Algorithm, Params, Version};

/// Errors from hashing or verifying a password.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
	#[error("password must not be empty")]
	Empty,

	#[error("failed to hash password: {0}")]
	Hash(String),

	#[error("stored password hash is malformed: {0}")]
	MalformedHash(String),
}

#[inline]
fn argon2_instance() -> Argon2<'static> {
	#[cfg(test)]
	{
		match Params::new(1024, 1, 1, None) {
			Ok(params) => Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
			Err(_) => Argon2::default(),
		}
	}

	#[cfg(not(test))]
	{
		Argon2::default()
	}
}

/// Hash a plaintext password into a PHC string.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
	if password.is_empty() {
		return Err(PasswordError::Empty);
	}
	let salt = SaltString::generate(&mut OsRng);
	argon2_instance()
		.hash_password(password.as_bytes(), &salt)
		.map(|hash| hash.to_string())
		.map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check a plaintext password against a stored PHC string.
///
/// A wrong password is `Ok(false)`; only an unparseable hash is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
	let parsed =
		PasswordHash::new(stored_hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;
	Ok(argon2_instance()
		.verify_password(password.as_bytes(), &parsed)
		.is_ok())
}
