// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-resource access policies.
//!
//! Each module exposes an `evaluate` function called by the engine once the
//! subject is known to be authenticated (or, for registration, not required
//! to be).

pub mod comment;
pub mod contributor;
pub mod issue;
pub mod project;
pub mod user;

use super::types::{Decision, DenyReason, ResourceAttrs, RoleSet, SubjectAttrs};

/// Owner or contributor; anyone else is refused without revealing the target.
pub(crate) fn require_member(roles: &RoleSet) -> Decision {
	Decision::allow_if(roles.is_member(), DenyReason::Concealed)
}

/// Owner only; contributors are told no, outsiders learn nothing.
pub(crate) fn require_owner(roles: &RoleSet) -> Decision {
	if roles.is_owner() {
		Decision::Allow
	} else if roles.is_member() {
		Decision::Deny(DenyReason::NotAuthorized)
	} else {
		Decision::Deny(DenyReason::Concealed)
	}
}

/// Member and author of the item. Project ownership does not stand in for authorship.
pub(crate) fn require_author(subject: &SubjectAttrs, roles: &RoleSet, resource: &ResourceAttrs) -> Decision {
	if !roles.is_member() {
		return Decision::Deny(DenyReason::Concealed);
	}
	match resource.author_id {
		Some(author) if subject.is_user(author) => Decision::Allow,
		_ => Decision::Deny(DenyReason::NotAuthorized),
	}
}
