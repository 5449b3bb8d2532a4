// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity operations: registration, profile management and account deletion.
//!
//! Deleting an account hands everything the user owns or authored to other
//! identities first (see [`UserService::delete_identity`]).

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use softdesk_server_api::{RegisterRequest, UpdateUserRequest};
use softdesk_server_auth::user::{validate_age, validate_username};
use softdesk_server_auth::{
	hash_password, resolve_identity_roles, AuthContext, Operation, ReassignmentSummary, ResourceAttrs,
	ResourceRef, SubjectAttrs, User, UserId,
};
use softdesk_server_config::AuthConfig;
use softdesk_server_db::UserStore;

use super::access::check;
use super::error::ServiceError;

#[derive(Clone)]
pub struct UserService {
	users: Arc<dyn UserStore>,
	config: AuthConfig,
}

impl UserService {
	pub fn new(users: Arc<dyn UserStore>, config: AuthConfig) -> Self {
		Self { users, config }
	}

	/// Self-service registration. Anonymous callers are welcome.
	///
	/// # Errors
	/// - `Forbidden` when signups are disabled
	/// - `Validation` for a bad username, empty password or underage user
	/// - `Conflict` when the username is taken
	#[tracing::instrument(skip(self, auth, request), fields(username = %request.username))]
	pub async fn register(&self, auth: &AuthContext, request: RegisterRequest) -> Result<User, ServiceError> {
		let target = ResourceRef::Identity(None);
		authorize_identity(auth, &target, Operation::Create)?;
		if self.config.signups_disabled {
			tracing::debug!("registration refused: signups disabled");
			return Err(ServiceError::Forbidden);
		}

		let user = self
			.new_user(&request.username, &request.password, request.date_of_birth)?
			.with_consents(request.can_be_contacted, request.can_data_be_shared);
		self.users.create_user(&user).await?;
		tracing::debug!(user_id = %user.id, "user registered");
		Ok(user)
	}

	/// Create an admin identity. Only reachable from the operator CLI.
	#[tracing::instrument(skip(self, password))]
	pub async fn create_admin(&self, username: &str, password: &str, date_of_birth: NaiveDate) -> Result<User, ServiceError> {
		let user = self.new_user(username, password, date_of_birth)?.with_admin(true);
		self.users.create_user(&user).await?;
		tracing::info!(user_id = %user.id, "admin user created");
		Ok(user)
	}

	#[tracing::instrument(skip(self, auth))]
	pub async fn list(&self, auth: &AuthContext) -> Result<Vec<User>, ServiceError> {
		authorize_identity(auth, &ResourceRef::Identity(None), Operation::List)?;
		Ok(self.users.list_users().await?)
	}

	#[tracing::instrument(skip(self, auth), fields(%user_id))]
	pub async fn get(&self, auth: &AuthContext, user_id: UserId) -> Result<User, ServiceError> {
		authorize_identity(auth, &ResourceRef::Identity(Some(user_id)), Operation::Read)?;
		self.load(user_id).await
	}

	/// Update password, date of birth or consents. Username and admin flag are fixed.
	#[tracing::instrument(skip(self, auth, request), fields(%user_id))]
	pub async fn update(
		&self,
		auth: &AuthContext,
		user_id: UserId,
		request: UpdateUserRequest,
	) -> Result<User, ServiceError> {
		authorize_identity(auth, &ResourceRef::Identity(Some(user_id)), Operation::Update)?;
		let mut user = self.load(user_id).await?;

		if let Some(date_of_birth) = request.date_of_birth {
			validate_age(
				date_of_birth,
				Utc::now().date_naive(),
				self.config.min_registration_age_years,
			)?;
			user.date_of_birth = date_of_birth;
		}
		if let Some(password) = request.password.as_deref() {
			user.password_hash = hash_password(password)?;
		}
		if let Some(can_be_contacted) = request.can_be_contacted {
			user.can_be_contacted = can_be_contacted;
		}
		if let Some(can_data_be_shared) = request.can_data_be_shared {
			user.can_data_be_shared = can_data_be_shared;
		}
		user.updated_at = Utc::now();

		self.users.update_user(&user).await?;
		tracing::debug!(%user_id, "user updated");
		Ok(user)
	}

	/// Reassign everything the identity owns or authored, then delete it,
	/// all in one transaction.
	///
	/// # Errors
	/// - `Configuration` when no other admin exists to inherit projects; the
	///   account is left untouched
	#[tracing::instrument(skip(self, auth), fields(%user_id))]
	pub async fn delete_identity(&self, auth: &AuthContext, user_id: UserId) -> Result<ReassignmentSummary, ServiceError> {
		authorize_identity(auth, &ResourceRef::Identity(Some(user_id)), Operation::Delete)?;
		let summary = self.users.reassign_and_delete_user(&user_id).await?;
		tracing::debug!(%user_id, projects = summary.projects_reassigned, "user deleted");
		Ok(summary)
	}

	fn new_user(&self, username: &str, password: &str, date_of_birth: NaiveDate) -> Result<User, ServiceError> {
		validate_username(username)?;
		validate_age(
			date_of_birth,
			Utc::now().date_naive(),
			self.config.min_registration_age_years,
		)?;
		let password_hash = hash_password(password)?;
		Ok(User::new(username, password_hash, date_of_birth))
	}

	async fn load(&self, user_id: UserId) -> Result<User, ServiceError> {
		self.users
			.get_user_by_id(&user_id)
			.await?
			.ok_or_else(|| ServiceError::not_found("user"))
	}
}

fn authorize_identity(auth: &AuthContext, target: &ResourceRef, operation: Operation) -> Result<(), ServiceError> {
	let subject = SubjectAttrs::from_auth(auth);
	let target_id = match *target {
		ResourceRef::Identity(id) => id,
		_ => None,
	};
	let roles = resolve_identity_roles(&subject, target_id);
	check(&subject, &roles, &ResourceAttrs::from_ref(target), operation)
}
