// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reassignment rules applied when an account is deleted.
//!
//! Deleting an identity hands its records to someone else before the row
//! goes away:
//! - projects go to the fallback admin
//! - issues and comments go to the (new) owner of their project
//! - assignments are cleared
//! - contributor edges move to the fallback admin, unless that would
//!   duplicate an edge or give the project owner a contributor row
//!
//! The database layer runs these steps in one transaction; this module holds
//! the decisions that do not need I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// An admin account that could inherit the deleted identity's projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackCandidate {
	pub user_id: UserId,
	pub created_at: DateTime<Utc>,
}

/// Pick the earliest-created admin, ties broken by id, never the identity
/// being deleted.
pub fn select_fallback_admin(candidates: &[FallbackCandidate], deleting: UserId) -> Option<UserId> {
	candidates
		.iter()
		.filter(|c| c.user_id != deleting)
		.min_by(|a, b| {
			a.created_at
				.cmp(&b.created_at)
				.then_with(|| a.user_id.cmp(&b.user_id))
		})
		.map(|c| c.user_id)
}

/// What happens to one contributor edge of the deleted identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeTransfer {
	/// Re-point the edge at the fallback admin.
	Move,
	/// Remove the edge.
	Drop,
}

/// Decide the fate of an edge on a project, given the fallback's standing there.
pub fn plan_edge_transfer(fallback_has_edge: bool, fallback_owns_project: bool) -> EdgeTransfer {
	if fallback_has_edge || fallback_owns_project {
		EdgeTransfer::Drop
	} else {
		EdgeTransfer::Move
	}
}

/// Counts of what a completed reassignment touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignmentSummary {
	pub deleted_user_id: Option<UserId>,
	pub fallback_admin_id: Option<UserId>,
	pub projects_reassigned: u64,
	pub issues_reassigned: u64,
	pub comments_reassigned: u64,
	pub assignments_cleared: u64,
	pub contributor_edges_moved: u64,
	pub contributor_edges_dropped: u64,
	pub sessions_revoked: u64,
}
