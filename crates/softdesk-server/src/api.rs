// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router construction.

use std::sync::Arc;

use axum::{
	middleware::from_fn_with_state,
	routing::{get, post},
	Router,
};
use softdesk_server_config::{AuthConfig, ServerConfig};
use softdesk_server_db::{
	CommentRepository, IssueRepository, ProjectRepository, SessionRepository, UserRepository,
};
use sqlx::SqlitePool;

use crate::{
	auth_middleware::auth_layer,
	routes,
	services::{
		AccessResolver, CommentService, ContributorService, IssueService, ProjectService,
		SessionService, UserService,
	},
};

/// Shared state for every handler.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub user_repo: Arc<UserRepository>,
	pub session_repo: Arc<SessionRepository>,
	pub project_repo: Arc<ProjectRepository>,
	pub issue_repo: Arc<IssueRepository>,
	pub comment_repo: Arc<CommentRepository>,
	pub auth_config: AuthConfig,
	pub projects: Arc<ProjectService>,
	pub contributors: Arc<ContributorService>,
	pub issues: Arc<IssueService>,
	pub comments: Arc<CommentService>,
	pub users: Arc<UserService>,
	pub sessions: Arc<SessionService>,
}

/// Wire repositories and services over one pool.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let user_repo = Arc::new(UserRepository::new(pool.clone()));
	let session_repo = Arc::new(SessionRepository::new(pool.clone()));
	let project_repo = Arc::new(ProjectRepository::new(pool.clone()));
	let issue_repo = Arc::new(IssueRepository::new(pool.clone()));
	let comment_repo = Arc::new(CommentRepository::new(pool.clone()));

	let access = AccessResolver::new(project_repo.clone(), issue_repo.clone());
	let auth_config = config.auth.clone();

	AppState {
		projects: Arc::new(ProjectService::new(
			access.clone(),
			project_repo.clone(),
			issue_repo.clone(),
		)),
		contributors: Arc::new(ContributorService::new(
			access.clone(),
			project_repo.clone(),
			user_repo.clone(),
		)),
		issues: Arc::new(IssueService::new(
			access.clone(),
			issue_repo.clone(),
			comment_repo.clone(),
		)),
		comments: Arc::new(CommentService::new(access, comment_repo.clone())),
		users: Arc::new(UserService::new(user_repo.clone(), auth_config.clone())),
		sessions: Arc::new(SessionService::new(
			user_repo.clone(),
			session_repo.clone(),
			auth_config.clone(),
		)),
		pool,
		user_repo,
		session_repo,
		project_repo,
		issue_repo,
		comment_repo,
		auth_config,
	}
}

pub fn create_router(state: AppState) -> Router {
	let auth: Router<AppState> = Router::new()
		.route("/api/auth/token", post(routes::auth::login))
		.route("/api/auth/token/refresh", post(routes::auth::refresh))
		.route("/api/auth/token/revoke", post(routes::auth::revoke));

	let users: Router<AppState> = Router::new()
		.route(
			"/api/users",
			get(routes::users::list_users).post(routes::users::register),
		)
		.route(
			"/api/users/{user_id}",
			get(routes::users::get_user)
				.patch(routes::users::update_user)
				.delete(routes::users::delete_user),
		);

	let projects: Router<AppState> = Router::new()
		.route(
			"/api/projects",
			get(routes::projects::list_projects).post(routes::projects::create_project),
		)
		.route(
			"/api/projects/{project_id}",
			get(routes::projects::get_project)
				.patch(routes::projects::update_project)
				.delete(routes::projects::delete_project),
		)
		.route(
			"/api/projects/{project_id}/contributors",
			get(routes::contributors::list_contributors).post(routes::contributors::add_contributor),
		)
		.route(
			"/api/projects/{project_id}/contributors/{user_id}",
			get(routes::contributors::get_contributor).delete(routes::contributors::remove_contributor),
		)
		.route(
			"/api/projects/{project_id}/issues",
			get(routes::issues::list_issues).post(routes::issues::create_issue),
		)
		.route(
			"/api/projects/{project_id}/issues/{issue_id}",
			get(routes::issues::get_issue)
				.patch(routes::issues::update_issue)
				.delete(routes::issues::delete_issue),
		)
		.route(
			"/api/projects/{project_id}/issues/{issue_id}/comments",
			get(routes::comments::list_comments).post(routes::comments::create_comment),
		)
		.route(
			"/api/projects/{project_id}/issues/{issue_id}/comments/{comment_id}",
			get(routes::comments::get_comment)
				.patch(routes::comments::update_comment)
				.delete(routes::comments::delete_comment),
		);

	Router::new()
		.route("/health", get(routes::health::health_check))
		.merge(auth)
		.merge(users)
		.merge(projects)
		.layer(from_fn_with_state(state.clone(), auth_layer))
		.with_state(state)
}
