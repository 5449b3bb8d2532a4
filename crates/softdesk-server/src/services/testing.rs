// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use chrono::NaiveDate;
use softdesk_server_auth::{
	AuthContext, Contributor, CurrentUser, Issue, Project, ProjectType, SessionId, User,
};
use softdesk_server_config::AuthConfig;
use softdesk_server_db::{
	create_pool, run_migrations, CommentRepository, IssueRepository, ProjectRepository,
	SessionRepository, UserRepository,
};
use tempfile::TempDir;

use super::{
	AccessResolver, CommentService, ContributorService, IssueService, ProjectService, SessionService,
	UserService,
};

/// Repositories over a throwaway SQLite file with the full schema.
pub struct TestEnv {
	pub users: Arc<UserRepository>,
	pub sessions: Arc<SessionRepository>,
	pub projects: Arc<ProjectRepository>,
	pub issues: Arc<IssueRepository>,
	pub comments: Arc<CommentRepository>,
	pub auth_config: AuthConfig,
	_temp_dir: TempDir,
}

impl TestEnv {
	pub async fn new() -> Self {
		let temp_dir = tempfile::tempdir().unwrap();
		let db_path = temp_dir.path().join("services.db");
		let pool = create_pool(&format!("sqlite:{}?mode=rwc", db_path.display()))
			.await
			.unwrap();
		run_migrations(&pool).await.unwrap();

		Self {
			users: Arc::new(UserRepository::new(pool.clone())),
			sessions: Arc::new(SessionRepository::new(pool.clone())),
			projects: Arc::new(ProjectRepository::new(pool.clone())),
			issues: Arc::new(IssueRepository::new(pool.clone())),
			comments: Arc::new(CommentRepository::new(pool)),
			auth_config: AuthConfig::default(),
			_temp_dir: temp_dir,
		}
	}

	pub async fn user(&self, username: &str) -> User {
		self.insert_user(username, false).await
	}

	pub async fn admin(&self, username: &str) -> User {
		self.insert_user(username, true).await
	}

	async fn insert_user(&self, username: &str, is_admin: bool) -> User {
		let user = User::new(
			username,
			"$argon2id$test".to_string(),
			NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
		)
		.with_admin(is_admin);
		self.users.create_user(&user).await.unwrap();
		user
	}

	pub async fn project(&self, owner: &User, name: &str) -> Project {
		let project = Project::new(owner.id, name, "test project", ProjectType::Backend);
		self.projects.create_project(&project).await.unwrap();
		project
	}

	pub async fn add_contributor(&self, project: &Project, user: &User) {
		self.projects
			.add_contributor(&Contributor::new(project.id, user.id))
			.await
			.unwrap();
	}

	pub async fn issue(&self, project: &Project, author: &User, title: &str) -> Issue {
		let issue = Issue::new(project.id, author.id, title, "test issue");
		self.issues.create_issue(&issue).await.unwrap();
		issue
	}

	pub fn access(&self) -> AccessResolver {
		AccessResolver::new(self.projects.clone(), self.issues.clone())
	}

	pub fn project_service(&self) -> ProjectService {
		ProjectService::new(self.access(), self.projects.clone(), self.issues.clone())
	}

	pub fn contributor_service(&self) -> ContributorService {
		ContributorService::new(self.access(), self.projects.clone(), self.users.clone())
	}

	pub fn issue_service(&self) -> IssueService {
		IssueService::new(self.access(), self.issues.clone(), self.comments.clone())
	}

	pub fn comment_service(&self) -> CommentService {
		CommentService::new(self.access(), self.comments.clone())
	}

	pub fn user_service(&self) -> UserService {
		UserService::new(self.users.clone(), self.auth_config.clone())
	}

	pub fn session_service(&self) -> SessionService {
		SessionService::new(self.users.clone(), self.sessions.clone(), self.auth_config.clone())
	}
}

pub fn auth_as(user: &User) -> AuthContext {
	AuthContext::authenticated(CurrentUser::from_session(user, SessionId::generate()))
}
