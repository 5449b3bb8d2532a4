// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity (user account) policy.

use crate::abac::{Decision, DenyReason, Operation, RoleSet, SubjectAttrs};

/// Registration is open; the directory is admin-only; a profile belongs to
/// its identity and to admins.
pub fn evaluate(subject: &SubjectAttrs, roles: &RoleSet, operation: Operation) -> Decision {
	match operation {
		Operation::Create => Decision::Allow,
		Operation::List => Decision::allow_if(subject.is_admin(), DenyReason::NotAuthorized),
		Operation::Read | Operation::Update | Operation::Delete => {
			Decision::allow_if(roles.is_self() || subject.is_admin(), DenyReason::NotAuthorized)
		}
	}
}
