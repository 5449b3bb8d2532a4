// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Contributor membership policy.

use super::{require_member, require_owner};
use crate::abac::{Decision, DenyReason, Operation, RoleSet};

/// Members see the roster; only the owner changes it. Edges are immutable.
pub fn evaluate(roles: &RoleSet, operation: Operation) -> Decision {
	match operation {
		Operation::List | Operation::Read => require_member(roles),
		Operation::Create | Operation::Delete => require_owner(roles),
		Operation::Update => {
			if roles.is_member() {
				Decision::Deny(DenyReason::NotAuthorized)
			} else {
				Decision::Deny(DenyReason::Concealed)
			}
		}
	}
}
