// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Type definitions for access decisions.
//!
//! - [`SubjectAttrs`]: who is asking (identity, admin flag)
//! - [`RoleSet`]: what the subject is relative to the owning project
//! - [`ResourceRef`]: which node of the project → issue → comment tree is addressed
//! - [`ResourceAttrs`]: the facts about that node the policies need
//! - [`Operation`] / [`Decision`]: the request and the verdict
//!
//! # Design Principles
//!
//! 1. **Immutable evaluation**: attributes are loaded before evaluation starts
//! 2. **No database access**: policy functions are pure
//! 3. **Denial is a value**: a refusal is [`Decision::Deny`], never an error

use serde::{Deserialize, Serialize};

use crate::middleware::AuthContext;
use crate::{CommentId, IssueId, ProjectId, UserId};

/// Attributes describing the subject requesting access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubjectAttrs {
	/// `None` for anonymous requests.
	pub user_id: Option<UserId>,
	pub is_admin: bool,
}

impl SubjectAttrs {
	/// An authenticated, non-admin subject.
	pub fn new(user_id: UserId) -> Self {
		Self {
			user_id: Some(user_id),
			is_admin: false,
		}
	}

	pub fn anonymous() -> Self {
		Self::default()
	}

	/// Build the subject for the identity behind a request.
	pub fn from_auth(auth: &AuthContext) -> Self {
		match auth.user() {
			Some(user) => Self {
				user_id: Some(user.id),
				is_admin: user.is_admin,
			},
			None => Self::anonymous(),
		}
	}

	/// Builder: set the admin flag.
	pub fn with_admin(mut self, is_admin: bool) -> Self {
		self.is_admin = is_admin;
		self
	}

	pub fn is_authenticated(&self) -> bool {
		self.user_id.is_some()
	}

	/// Returns true if the subject is the given identity.
	pub fn is_user(&self, user_id: UserId) -> bool {
		self.user_id == Some(user_id)
	}

	/// Returns true if the subject is an authenticated admin.
	pub fn is_admin(&self) -> bool {
		self.is_authenticated() && self.is_admin
	}
}

/// A role held on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	Owner,
	Contributor,
}

/// The roles a subject holds on the project that owns a resource.
///
/// For identity resources, `owner` means "the subject is this identity"
/// (see [`RoleSet::is_self`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleSet {
	pub owner: bool,
	pub contributor: bool,
}

impl RoleSet {
	/// No role at all.
	pub fn none() -> Self {
		Self::default()
	}

	pub fn owner() -> Self {
		Self {
			owner: true,
			contributor: false,
		}
	}

	pub fn contributor() -> Self {
		Self {
			owner: false,
			contributor: true,
		}
	}

	/// The self-role on an identity resource.
	pub fn self_role() -> Self {
		Self::owner()
	}

	pub fn contains(&self, role: Role) -> bool {
		match role {
			Role::Owner => self.owner,
			Role::Contributor => self.contributor,
		}
	}

	pub fn is_owner(&self) -> bool {
		self.owner
	}

	/// Owner or contributor.
	pub fn is_member(&self) -> bool {
		self.owner || self.contributor
	}

	/// On identity resources: the subject is the identity itself.
	pub fn is_self(&self) -> bool {
		self.owner
	}

	pub fn is_empty(&self) -> bool {
		!self.is_member()
	}

	/// Roles held, owner first.
	pub fn roles(&self) -> Vec<Role> {
		let mut roles = Vec::with_capacity(2);
		if self.owner {
			roles.push(Role::Owner);
		}
		if self.contributor {
			roles.push(Role::Contributor);
		}
		roles
	}
}

/// Kinds of resources protected by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
	Project,
	Contributor,
	Issue,
	Comment,
	Identity,
}

/// Address of a resource in the tracker hierarchy.
///
/// The child id is `None` when the collection itself is addressed (list or
/// create).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceRef {
	Project(Option<ProjectId>),
	Contributor {
		project_id: ProjectId,
		user_id: Option<UserId>,
	},
	Issue {
		project_id: ProjectId,
		issue_id: Option<IssueId>,
	},
	Comment {
		project_id: ProjectId,
		issue_id: IssueId,
		comment_id: Option<CommentId>,
	},
	Identity(Option<UserId>),
}

impl ResourceRef {
	pub fn kind(&self) -> ResourceKind {
		match self {
			ResourceRef::Project(_) => ResourceKind::Project,
			ResourceRef::Contributor { .. } => ResourceKind::Contributor,
			ResourceRef::Issue { .. } => ResourceKind::Issue,
			ResourceRef::Comment { .. } => ResourceKind::Comment,
			ResourceRef::Identity(_) => ResourceKind::Identity,
		}
	}

	/// The project this resource hangs off, if any.
	pub fn project_id(&self) -> Option<ProjectId> {
		match *self {
			ResourceRef::Project(id) => id,
			ResourceRef::Contributor { project_id, .. }
			| ResourceRef::Issue { project_id, .. }
			| ResourceRef::Comment { project_id, .. } => Some(project_id),
			ResourceRef::Identity(_) => None,
		}
	}

	/// The issue a comment hangs off.
	pub fn parent_issue_id(&self) -> Option<IssueId> {
		match *self {
			ResourceRef::Comment { issue_id, .. } => Some(issue_id),
			_ => None,
		}
	}
}

/// Attributes describing the resource being accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceAttrs {
	pub kind: ResourceKind,
	pub project_id: Option<ProjectId>,
	/// Author of an issue or comment, once it has been loaded.
	pub author_id: Option<UserId>,
	/// The identity addressed by an identity resource.
	pub target_user_id: Option<UserId>,
}

impl ResourceAttrs {
	fn of(kind: ResourceKind, project_id: Option<ProjectId>) -> Self {
		Self {
			kind,
			project_id,
			author_id: None,
			target_user_id: None,
		}
	}

	/// A project, or the project collection when `project_id` is `None`.
	pub fn project(project_id: Option<ProjectId>) -> Self {
		Self::of(ResourceKind::Project, project_id)
	}

	pub fn contributor(project_id: ProjectId) -> Self {
		Self::of(ResourceKind::Contributor, Some(project_id))
	}

	pub fn issue(project_id: ProjectId) -> Self {
		Self::of(ResourceKind::Issue, Some(project_id))
	}

	pub fn comment(project_id: ProjectId) -> Self {
		Self::of(ResourceKind::Comment, Some(project_id))
	}

	/// An identity, or the identity collection when `target` is `None`.
	pub fn identity(target: Option<UserId>) -> Self {
		Self {
			target_user_id: target,
			..Self::of(ResourceKind::Identity, None)
		}
	}

	/// Attributes for an address, before any child has been loaded.
	pub fn from_ref(resource: &ResourceRef) -> Self {
		match *resource {
			ResourceRef::Project(id) => Self::project(id),
			ResourceRef::Contributor { project_id, .. } => Self::contributor(project_id),
			ResourceRef::Issue { project_id, .. } => Self::issue(project_id),
			ResourceRef::Comment { project_id, .. } => Self::comment(project_id),
			ResourceRef::Identity(target) => Self::identity(target),
		}
	}

	/// Builder: set the author of an issue or comment.
	pub fn with_author(mut self, author_id: UserId) -> Self {
		self.author_id = Some(author_id);
		self
	}
}

/// Operations that can be requested on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
	List,
	Read,
	Create,
	Update,
	Delete,
}

impl Operation {
	pub fn all() -> &'static [Operation] {
		&[
			Operation::List,
			Operation::Read,
			Operation::Create,
			Operation::Update,
			Operation::Delete,
		]
	}

	/// Update or delete.
	pub fn is_mutation(&self) -> bool {
		matches!(self, Operation::Update | Operation::Delete)
	}
}

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
	/// No authenticated identity.
	NotAuthenticated,
	/// Authenticated, but the held roles do not permit the operation.
	NotAuthorized,
	/// No role on the owning project; existence of the target is not revealed.
	Concealed,
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
	Allow,
	Deny(DenyReason),
}

impl Decision {
	pub fn is_allowed(&self) -> bool {
		matches!(self, Decision::Allow)
	}

	pub fn deny_reason(&self) -> Option<DenyReason> {
		match self {
			Decision::Allow => None,
			Decision::Deny(reason) => Some(*reason),
		}
	}

	/// Allow when `allowed`, otherwise deny with `reason`.
	pub fn allow_if(allowed: bool, reason: DenyReason) -> Self {
		if allowed {
			Decision::Allow
		} else {
			Decision::Deny(reason)
		}
	}
}
