// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access policy engine.
//!
//! [`authorize`] evaluates in two phases:
//!
//! 1. **Authentication gate**: anonymous subjects are refused everything
//!    except registration
//! 2. **Resource-specific policy**: delegates to the modules in
//!    [`super::policies`]
//!
//! Evaluation is pure; the caller resolves roles and loads attributes first.

use super::policies::{comment, contributor, issue, project, user};
use super::types::{Decision, DenyReason, Operation, ResourceAttrs, ResourceKind, RoleSet, SubjectAttrs};
use tracing::instrument;

/// Decide whether `subject`, holding `roles` on the owning project, may
/// perform `operation` on `resource`.
///
/// Every decision is logged at debug level.
#[instrument(
	level = "debug",
	skip(subject, roles, resource),
	fields(
		user_id = ?subject.user_id,
		kind = ?resource.kind,
		operation = ?operation,
	)
)]
pub fn authorize(
	subject: &SubjectAttrs,
	roles: &RoleSet,
	resource: &ResourceAttrs,
	operation: Operation,
) -> Decision {
	let decision = evaluate(subject, roles, resource, operation);
	match decision {
		Decision::Allow => tracing::debug!("access allowed"),
		Decision::Deny(reason) => tracing::debug!(?reason, "access denied"),
	}
	decision
}

/// Shorthand for `authorize(..).is_allowed()`.
pub fn is_allowed(
	subject: &SubjectAttrs,
	roles: &RoleSet,
	resource: &ResourceAttrs,
	operation: Operation,
) -> bool {
	authorize(subject, roles, resource, operation).is_allowed()
}

fn evaluate(
	subject: &SubjectAttrs,
	roles: &RoleSet,
	resource: &ResourceAttrs,
	operation: Operation,
) -> Decision {
	let is_registration = resource.kind == ResourceKind::Identity && operation == Operation::Create;
	if !subject.is_authenticated() && !is_registration {
		return Decision::Deny(DenyReason::NotAuthenticated);
	}

	match resource.kind {
		ResourceKind::Project => project::evaluate(roles, operation),
		ResourceKind::Contributor => contributor::evaluate(roles, operation),
		ResourceKind::Issue => issue::evaluate(subject, roles, resource, operation),
		ResourceKind::Comment => comment::evaluate(subject, roles, resource, operation),
		ResourceKind::Identity => user::evaluate(subject, roles, operation),
	}
}
