// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions shared by the auth system and the tracker entities.
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs for every entity
//!   ([`UserId`], [`ProjectId`], [`IssueId`], ...) preventing accidental mixing
//! - **Choice enums**: the closed value sets for projects and issues
//!   ([`ProjectType`], [`IssuePriority`], [`IssueTag`], [`IssueStatus`])
//!
//! All ID types implement transparent serde serialization (as UUID strings) and
//! provide conversion to/from [`uuid::Uuid`]. Choice enums serialize to the same
//! wire strings they are stored under, and parse back with [`std::str::FromStr`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl FromStr for $name {
			type Err = uuid::Error;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Uuid::parse_str(s).map(Self)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user account.");
define_id_type!(SessionId, "Unique identifier for a login session.");
define_id_type!(ProjectId, "Unique identifier for a project.");
define_id_type!(ContributorId, "Unique identifier for a contributor membership edge.");
define_id_type!(IssueId, "Unique identifier for an issue.");
define_id_type!(CommentId, "Unique identifier for a comment.");

// =============================================================================
// Choice enums
// =============================================================================

/// Error returned when a stored or submitted choice value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value: '{value}'")]
pub struct ParseChoiceError {
	pub kind: &'static str,
	pub value: String,
}

macro_rules! define_choice_enum {
	(
		$(#[$meta:meta])*
		$name:ident, $kind:literal, { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		pub enum $name {
			$(
				$(#[$vmeta])*
				#[serde(rename = $wire)]
				$variant,
			)+
		}

		impl $name {
			/// Returns all available values.
			pub fn all() -> &'static [$name] {
				&[$($name::$variant),+]
			}

			/// The stored and serialized form of this value.
			pub fn as_str(&self) -> &'static str {
				match self {
					$($name::$variant => $wire,)+
				}
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(self.as_str())
			}
		}

		impl FromStr for $name {
			type Err = ParseChoiceError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($wire => Ok($name::$variant),)+
					_ => Err(ParseChoiceError {
						kind: $kind,
						value: s.to_string(),
					}),
				}
			}
		}
	};
}

define_choice_enum!(
	/// Platform a project targets.
	ProjectType, "project type", {
		Backend => "Backend",
		Frontend => "Frontend",
		IOs => "iOS",
		Android => "Android",
	}
);

define_choice_enum!(
	/// How urgent an issue is.
	IssuePriority, "priority", {
		Low => "LOW",
		Medium => "MEDIUM",
		High => "HIGH",
	}
);

define_choice_enum!(
	/// What kind of work an issue describes.
	IssueTag, "tag", {
		Bug => "BUG",
		Feature => "FEATURE",
		Task => "TASK",
	}
);

define_choice_enum!(
	/// Workflow state of an issue.
	IssueStatus, "status", {
		ToDo => "TO_DO",
		InProgress => "IN_PROGRESS",
		Finished => "FINISHED",
	}
);

impl Default for IssuePriority {
	fn default() -> Self {
		IssuePriority::Medium
	}
}

impl Default for IssueTag {
	fn default() -> Self {
		IssueTag::Bug
	}
}

impl Default for IssueStatus {
	fn default() -> Self {
		IssueStatus::ToDo
	}
}
