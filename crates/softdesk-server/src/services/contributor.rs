// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Contributor (project membership) operations.
//!
//! Edges are created and removed by the project owner only. They are never
//! updated.

use std::sync::Arc;

use softdesk_server_api::AddContributorRequest;
use softdesk_server_auth::{
	AuthContext, Contributor, Operation, ProjectId, ResourceAttrs, ResourceRef, UserId,
};
use softdesk_server_db::{ContributorWithUser, ProjectStore, UserStore};

use super::access::AccessResolver;
use super::error::ServiceError;

#[derive(Clone)]
pub struct ContributorService {
	access: AccessResolver,
	projects: Arc<dyn ProjectStore>,
	users: Arc<dyn UserStore>,
}

impl ContributorService {
	pub fn new(access: AccessResolver, projects: Arc<dyn ProjectStore>, users: Arc<dyn UserStore>) -> Self {
		Self {
			access,
			projects,
			users,
		}
	}

	#[tracing::instrument(skip(self, auth), fields(%project_id))]
	pub async fn list(&self, auth: &AuthContext, project_id: ProjectId) -> Result<Vec<ContributorWithUser>, ServiceError> {
		let target = ResourceRef::Contributor {
			project_id,
			user_id: None,
		};
		let scope = self.access.resolve(auth, &target).await?;
		scope.require(&ResourceAttrs::from_ref(&target), Operation::List)?;
		Ok(self.projects.list_contributors(&project_id).await?)
	}

	#[tracing::instrument(skip(self, auth), fields(%project_id, %user_id))]
	pub async fn get(
		&self,
		auth: &AuthContext,
		project_id: ProjectId,
		user_id: UserId,
	) -> Result<ContributorWithUser, ServiceError> {
		let target = ResourceRef::Contributor {
			project_id,
			user_id: Some(user_id),
		};
		let scope = self.access.resolve(auth, &target).await?;
		scope.require(&ResourceAttrs::from_ref(&target), Operation::Read)?;

		self.projects
			.get_contributor(&project_id, &user_id)
			.await?
			.ok_or_else(|| ServiceError::not_found("contributor"))
	}

	/// Add `request.user_id` to the project.
	///
	/// # Errors
	/// - `Validation` when the user is the project owner
	/// - `NotFound` when the user does not exist
	/// - `Conflict` when the edge already exists, including a raced insert
	#[tracing::instrument(skip(self, auth, request), fields(%project_id, user_id = %request.user_id))]
	pub async fn add(
		&self,
		auth: &AuthContext,
		project_id: ProjectId,
		request: AddContributorRequest,
	) -> Result<ContributorWithUser, ServiceError> {
		let target = ResourceRef::Contributor {
			project_id,
			user_id: Some(request.user_id),
		};
		let scope = self.access.resolve(auth, &target).await?;
		scope.require(&ResourceAttrs::from_ref(&target), Operation::Create)?;

		if scope.project()?.is_owned_by(request.user_id) {
			return Err(ServiceError::validation(
				"user_id",
				"the project owner cannot be added as a contributor",
			));
		}
		let user = self
			.users
			.get_user_by_id(&request.user_id)
			.await?
			.ok_or_else(|| ServiceError::not_found("user"))?;

		let contributor = Contributor::new(project_id, user.id);
		self.projects.add_contributor(&contributor).await?;
		tracing::debug!(%project_id, user_id = %user.id, "contributor added");

		Ok(ContributorWithUser {
			contributor,
			username: user.username,
		})
	}

	#[tracing::instrument(skip(self, auth), fields(%project_id, %user_id))]
	pub async fn remove(&self, auth: &AuthContext, project_id: ProjectId, user_id: UserId) -> Result<(), ServiceError> {
		let target = ResourceRef::Contributor {
			project_id,
			user_id: Some(user_id),
		};
		let scope = self.access.resolve(auth, &target).await?;
		scope.require(&ResourceAttrs::from_ref(&target), Operation::Delete)?;

		if !self.projects.remove_contributor(&project_id, &user_id).await? {
			return Err(ServiceError::not_found("contributor"));
		}
		tracing::debug!(%project_id, %user_id, "contributor removed");
		Ok(())
	}
}
