// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	body::Body,
	http::{header::HeaderName, header::HeaderValue, Method, Request, StatusCode},
	response::Response,
	Router,
};
use chrono::NaiveDate;
use serde::Serialize;
use softdesk_server_auth::{
	generate_session_token, Comment, Contributor, Issue, Project, ProjectType, Session, User,
};
use tempfile::TempDir;
use tower::ServiceExt;

use softdesk_server::{
	api::{create_app_state, create_router, AppState},
	ServerConfig,
};

/// Placeholder hash for fixture accounts that never log in with a password.
const FIXTURE_PASSWORD_HASH: &str = "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$fixture";

#[derive(Clone)]
pub struct TestUser {
	pub user: User,
	pub session_token: String,
}

impl TestUser {
	pub fn auth_header(&self) -> (HeaderName, HeaderValue) {
		(
			HeaderName::from_static("authorization"),
			HeaderValue::from_str(&format!("Bearer {}", self.session_token)).unwrap(),
		)
	}
}

/// Alice owns Alpha, Bob contributes to it and filed "Login bug" with one
/// comment, Carol has no relationship to Alpha.
#[derive(Clone)]
pub struct Fixtures {
	pub alice: TestUser,
	pub bob: TestUser,
	pub carol: TestUser,
	pub admin: TestUser,
	pub alpha: Project,
	pub login_bug: Issue,
	pub bob_comment: Comment,
}

impl Fixtures {
	pub fn project_path(&self) -> String {
		format!("/api/projects/{}", self.alpha.id)
	}

	pub fn issue_path(&self) -> String {
		format!("{}/issues/{}", self.project_path(), self.login_bug.id)
	}

	pub fn comment_path(&self) -> String {
		format!("{}/comments/{}", self.issue_path(), self.bob_comment.id)
	}
}

pub struct TestApp {
	pub router: Router,
	pub fixtures: Fixtures,
	pub state: AppState,
	_temp_dir: TempDir,
}

impl TestApp {
	pub async fn new() -> Self {
		Self::with_config(ServerConfig::default()).await
	}

	pub async fn with_config(config: ServerConfig) -> Self {
		let temp_dir = tempfile::tempdir().unwrap();
		let db_path = temp_dir.path().join("test_authz.db");
		let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
		let pool = softdesk_server_db::create_pool(&db_url).await.unwrap();
		softdesk_server_db::run_migrations(&pool).await.unwrap();
		let state = create_app_state(pool, &config);

		let fixtures = create_fixtures(&state).await;
		let router = create_router(state.clone());

		Self {
			router,
			fixtures,
			state,
			_temp_dir: temp_dir,
		}
	}

	pub async fn get(&self, path: &str, user: Option<&TestUser>) -> Response<Body> {
		self
			.request(Method::GET, path, user, Option::<()>::None)
			.await
	}

	pub async fn post(&self, path: &str, user: Option<&TestUser>, body: impl Serialize) -> Response<Body> {
		self.request(Method::POST, path, user, Some(body)).await
	}

	pub async fn patch(&self, path: &str, user: Option<&TestUser>, body: impl Serialize) -> Response<Body> {
		self.request(Method::PATCH, path, user, Some(body)).await
	}

	pub async fn delete(&self, path: &str, user: Option<&TestUser>) -> Response<Body> {
		self
			.request(Method::DELETE, path, user, Option::<()>::None)
			.await
	}

	/// Send a bodiless request with a raw `Authorization` header value.
	pub async fn send_with_authorization(&self, method: Method, path: &str, authorization: &str) -> Response<Body> {
		let request = Request::builder()
			.method(method)
			.uri(path)
			.header("authorization", authorization)
			.body(Body::empty())
			.unwrap();

		self.router.clone().oneshot(request).await.unwrap()
	}

	async fn request<T: Serialize>(
		&self,
		method: Method,
		path: &str,
		user: Option<&TestUser>,
		body: Option<T>,
	) -> Response<Body> {
		let mut builder = Request::builder().method(method).uri(path);

		if let Some(test_user) = user {
			let (name, value) = test_user.auth_header();
			builder = builder.header(name, value);
		}

		let request_body = match body {
			Some(b) => {
				builder = builder.header("content-type", "application/json");
				Body::from(serde_json::to_string(&b).unwrap())
			}
			None => Body::empty(),
		};

		let request = builder.body(request_body).unwrap();

		self.router.clone().oneshot(request).await.unwrap()
	}
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&body).unwrap()
}

pub struct AuthzCase {
	pub name: &'static str,
	pub method: Method,
	pub path: String,
	pub user: Option<TestUser>,
	pub body: Option<serde_json::Value>,
	pub expected_status: StatusCode,
}

pub async fn run_authz_cases(app: &TestApp, cases: &[AuthzCase]) {
	for case in cases {
		let response = match (&case.method, &case.body) {
			(m, Some(body)) if *m == Method::POST => app.post(&case.path, case.user.as_ref(), body.clone()).await,
			(m, Some(body)) if *m == Method::PATCH => {
				app
					.patch(&case.path, case.user.as_ref(), body.clone())
					.await
			}
			(m, _) if *m == Method::DELETE => app.delete(&case.path, case.user.as_ref()).await,
			_ => app.get(&case.path, case.user.as_ref()).await,
		};

		if response.status() != case.expected_status {
			let (parts, body) = response.into_parts();
			let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
			let body_str = String::from_utf8_lossy(&body_bytes);
			panic!(
				"Case '{}': {} {} - expected {}, got {}\nResponse body: {}",
				case.name, case.method, case.path, case.expected_status, parts.status, body_str
			);
		}
	}
}

async fn create_fixtures(state: &AppState) -> Fixtures {
	let admin = create_test_user(state, "admin", true).await;
	let alice = create_test_user(state, "alice", false).await;
	let bob = create_test_user(state, "bob", false).await;
	let carol = create_test_user(state, "carol", false).await;

	let alpha = Project::new(alice.user.id, "Alpha", "Alice's project", ProjectType::Backend);
	state.project_repo.create_project(&alpha).await.unwrap();
	state
		.project_repo
		.add_contributor(&Contributor::new(alpha.id, bob.user.id))
		.await
		.unwrap();

	let login_bug = Issue::new(alpha.id, bob.user.id, "Login bug", "Login fails on empty password");
	state.issue_repo.create_issue(&login_bug).await.unwrap();

	let bob_comment = Comment::new(login_bug.id, bob.user.id, "Repro", "Happens every time");
	state.comment_repo.create_comment(&bob_comment).await.unwrap();

	Fixtures {
		alice,
		bob,
		carol,
		admin,
		alpha,
		login_bug,
		bob_comment,
	}
}

async fn create_test_user(state: &AppState, username: &str, is_admin: bool) -> TestUser {
	let user = User::new(
		username,
		FIXTURE_PASSWORD_HASH.to_string(),
		NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
	)
	.with_admin(is_admin);
	state.user_repo.create_user(&user).await.unwrap();

	let (session_token, token_hash) = generate_session_token();
	let session = Session::new(user.id, token_hash, chrono::Duration::hours(24));
	state.session_repo.create_session(&session).await.unwrap();

	TestUser {
		user,
		session_token,
	}
}
