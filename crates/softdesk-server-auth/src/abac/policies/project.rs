// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project access policy.

use super::{require_member, require_owner};
use crate::abac::{Decision, Operation, RoleSet};

/// Any authenticated identity may list (its own) projects and create new
/// ones; reading needs a role; editing and deleting belong to the owner.
pub fn evaluate(roles: &RoleSet, operation: Operation) -> Decision {
	match operation {
		Operation::List | Operation::Create => Decision::Allow,
		Operation::Read => require_member(roles),
		Operation::Update | Operation::Delete => require_owner(roles),
	}
}
