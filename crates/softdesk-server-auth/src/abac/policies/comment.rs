// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Comment access policy. Same shape as issues: members discuss, authors edit.

use super::{require_author, require_member};
use crate::abac::{Decision, Operation, ResourceAttrs, RoleSet, SubjectAttrs};

pub fn evaluate(
	subject: &SubjectAttrs,
	roles: &RoleSet,
	resource: &ResourceAttrs,
	operation: Operation,
) -> Decision {
	match operation {
		Operation::List | Operation::Read | Operation::Create => require_member(roles),
		Operation::Update | Operation::Delete => require_author(subject, roles, resource),
	}
}
