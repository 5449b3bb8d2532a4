// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User accounts and registration rules.
//!
//! This module provides:
//! - [`User`] - the stored identity, including its password hash
//! - [`UserProfile`] - the public view returned by the API
//! - Username and age validation applied at registration

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Maximum length of a username, in characters.
pub const USERNAME_MAX_LEN: usize = 20;

/// Minimum age, in whole years, required to register.
pub const MIN_REGISTRATION_AGE_YEARS: u32 = 15;

/// A registered identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,
	pub username: String,
	#[serde(skip_serializing, default)]
	pub password_hash: String,
	pub date_of_birth: NaiveDate,
	pub can_be_contacted: bool,
	pub can_data_be_shared: bool,
	pub is_admin: bool,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl User {
	/// Create a new non-admin user stamped with the current time.
	pub fn new(username: impl Into<String>, password_hash: String, date_of_birth: NaiveDate) -> Self {
		let now = Utc::now();
		Self {
			id: UserId::generate(),
			username: username.into(),
			password_hash,
			date_of_birth,
			can_be_contacted: false,
			can_data_be_shared: false,
			is_admin: false,
			created_at: now,
			updated_at: now,
		}
	}

	/// Builder: set the admin flag.
	pub fn with_admin(mut self, is_admin: bool) -> Self {
		self.is_admin = is_admin;
		self
	}

	/// Builder: set the contact and data-sharing consents.
	pub fn with_consents(mut self, can_be_contacted: bool, can_data_be_shared: bool) -> Self {
		self.can_be_contacted = can_be_contacted;
		self.can_data_be_shared = can_data_be_shared;
		self
	}

	/// Public profile view of this user.
	pub fn profile(&self) -> UserProfile {
		UserProfile::from(self)
	}
}

/// What other identities may see about a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
	pub id: UserId,
	pub username: String,
	pub date_of_birth: NaiveDate,
	pub can_be_contacted: bool,
	pub can_data_be_shared: bool,
	pub is_admin: bool,
	pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
	fn from(user: &User) -> Self {
		Self {
			id: user.id,
			username: user.username.clone(),
			date_of_birth: user.date_of_birth,
			can_be_contacted: user.can_be_contacted,
			can_data_be_shared: user.can_data_be_shared,
			is_admin: user.is_admin,
			created_at: user.created_at,
		}
	}
}

/// Why a registration payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
	#[error("username must not be empty")]
	UsernameEmpty,

	#[error("username must be at most {max} characters")]
	UsernameTooLong { max: usize },

	#[error("username may only contain letters, digits and @/./+/-/_")]
	UsernameInvalidChars,

	#[error("date of birth is in the future")]
	DateOfBirthInFuture,

	#[error("you must be at least {min_years} years old to register")]
	TooYoung { min_years: u32 },
}

impl UserValidationError {
	/// Name of the payload field the error refers to.
	pub fn field(&self) -> &'static str {
		match self {
			Self::UsernameEmpty | Self::UsernameTooLong { .. } | Self::UsernameInvalidChars => "username",
			Self::DateOfBirthInFuture | Self::TooYoung { .. } => "date_of_birth",
		}
	}
}

/// Validate a username: 1..=20 characters of letters, digits and `@.+-_`.
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
	if username.is_empty() {
		return Err(UserValidationError::UsernameEmpty);
	}
	if username.chars().count() > USERNAME_MAX_LEN {
		return Err(UserValidationError::UsernameTooLong {
			max: USERNAME_MAX_LEN,
		});
	}
	let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
	if !username.chars().all(allowed) {
		return Err(UserValidationError::UsernameInvalidChars);
	}
	Ok(())
}

/// Whole years elapsed between `date_of_birth` and `today`.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
	let mut years = today.year() - date_of_birth.year();
	if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
		years -= 1;
	}
	years
}

/// Check that someone born on `date_of_birth` is at least `min_years` old on `today`.
pub fn validate_age(
	date_of_birth: NaiveDate,
	today: NaiveDate,
	min_years: u32,
) -> Result<(), UserValidationError> {
	if date_of_birth > today {
		return Err(UserValidationError::DateOfBirthInFuture);
	}
	let old_enough = i32::try_from(min_years).is_ok_and(|min| age_on(date_of_birth, today) >= min);
	if !old_enough {
		return Err(UserValidationError::TooYoung { min_years });
	}
	Ok(())
}
