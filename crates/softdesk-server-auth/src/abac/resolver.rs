// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role resolution.
//!
//! Once the owning project of a resource has been located, the subject's
//! roles follow from two facts: who owns the project, and whether the subject
//! has a contributor edge on it. Loading those facts is the caller's job.

use super::types::{RoleSet, SubjectAttrs};
use crate::UserId;

/// Roles of `subject` on a project owned by `project_owner`.
///
/// Anonymous subjects hold no role. The owner is not implicitly a
/// contributor; `is_contributor` reports only an actual edge.
pub fn resolve_roles(subject: &SubjectAttrs, project_owner: UserId, is_contributor: bool) -> RoleSet {
	if !subject.is_authenticated() {
		return RoleSet::none();
	}
	RoleSet {
		owner: subject.is_user(project_owner),
		contributor: is_contributor,
	}
}

/// Roles of `subject` on the identity `target`.
pub fn resolve_identity_roles(subject: &SubjectAttrs, target: Option<UserId>) -> RoleSet {
	match target {
		Some(target) if subject.is_user(target) => RoleSet::self_role(),
		_ => RoleSet::none(),
	}
}
