// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::NaiveDate;
use softdesk_server_auth::{Issue, Project, ProjectType, User};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::migrations::run_migrations;
use crate::{IssueRepository, ProjectRepository, UserRepository};

/// In-memory pool with the full schema. A single connection keeps every
/// query on the same in-memory database.
pub async fn create_test_pool() -> SqlitePool {
	let options = SqliteConnectOptions::from_str(":memory:")
		.unwrap()
		.foreign_keys(true)
		.create_if_missing(true);

	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.connect_with(options)
		.await
		.expect("Failed to create test pool");

	run_migrations(&pool).await.unwrap();
	pool
}

/// File-backed pool opened the way the server opens it, so several
/// connections can contend for the write lock.
pub async fn create_file_pool() -> (SqlitePool, tempfile::TempDir) {
	let dir = tempfile::tempdir().unwrap();
	let url = format!("sqlite:{}", dir.path().join("softdesk.db").display());
	let pool = crate::create_pool(&url).await.unwrap();
	run_migrations(&pool).await.unwrap();
	(pool, dir)
}

pub async fn insert_user(pool: &SqlitePool, username: &str, is_admin: bool) -> User {
	let user = User::new(
		username,
		"$argon2id$test".to_string(),
		NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
	)
	.with_admin(is_admin);
	UserRepository::new(pool.clone())
		.create_user(&user)
		.await
		.unwrap();
	user
}

pub async fn insert_project(pool: &SqlitePool, owner: &User, name: &str) -> Project {
	let project = Project::new(owner.id, name, "test project", ProjectType::Backend);
	ProjectRepository::new(pool.clone())
		.create_project(&project)
		.await
		.unwrap();
	project
}

pub async fn insert_issue(pool: &SqlitePool, project: &Project, author: &User, title: &str) -> Issue {
	let issue = Issue::new(project.id, author.id, title, "test issue");
	IssueRepository::new(pool.clone())
		.create_issue(&issue)
		.await
		.unwrap();
	issue
}
