// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Token login, refresh and revoke over HTTP.

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::support::{body_json, TestApp};

async fn register_and_login(app: &TestApp, username: &str, password: &str) -> String {
	let response = app
		.post(
			"/api/users",
			None,
			json!({"username": username, "password": password, "date_of_birth": "1990-01-01"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);

	let response = app
		.post(
			"/api/auth/token",
			None,
			json!({"username": username, "password": password}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let json = body_json(response).await;
	assert_eq!(json["token_type"], "Bearer");
	assert_eq!(json["user"]["username"], username);
	json["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn login_issues_a_working_token() {
	let app = TestApp::new().await;
	let token = register_and_login(&app, "grace", "correct-horse").await;
	assert!(token.starts_with("sd_"));

	let response = app
		.send_with_authorization(Method::GET, "/api/projects", &format!("Bearer {token}"))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
	let app = TestApp::new().await;
	register_and_login(&app, "heidi", "correct-horse").await;

	let wrong_password = app
		.post(
			"/api/auth/token",
			None,
			json!({"username": "heidi", "password": "battery-staple"}),
		)
		.await;
	assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

	let unknown_user = app
		.post(
			"/api/auth/token",
			None,
			json!({"username": "nobody", "password": "correct-horse"}),
		)
		.await;
	assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_tokens_are_anonymous() {
	let app = TestApp::new().await;
	for header in ["Bearer nonsense", "Bearer sd_deadbeef", "Basic YWxpY2U6cHc="] {
		let response = app.send_with_authorization(Method::GET, "/api/projects", header).await;
		assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "header {header}");
		let json = body_json(response).await;
		assert_eq!(json["error"], "unauthorized");
	}
}

#[tokio::test]
async fn refresh_rotates_the_token() {
	let app = TestApp::new().await;
	let token = register_and_login(&app, "ivan", "correct-horse").await;

	let response = app.post("/api/auth/token/refresh", None, json!({})).await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

	let response = app
		.send_with_authorization(Method::POST, "/api/auth/token/refresh", &format!("Bearer {token}"))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let fresh = body_json(response).await["token"]
		.as_str()
		.unwrap()
		.to_string();
	assert_ne!(fresh, token);

	let old = app
		.send_with_authorization(Method::GET, "/api/projects", &format!("Bearer {token}"))
		.await;
	assert_eq!(old.status(), StatusCode::UNAUTHORIZED);
	let new = app
		.send_with_authorization(Method::GET, "/api/projects", &format!("Bearer {fresh}"))
		.await;
	assert_eq!(new.status(), StatusCode::OK);
}

#[tokio::test]
async fn revoke_ends_the_session() {
	let app = TestApp::new().await;
	let alice = app.fixtures.alice.clone();

	let response = app
		.post("/api/auth/token/revoke", Some(&alice), json!({}))
		.await;
	assert_eq!(response.status(), StatusCode::NO_CONTENT);

	let response = app.get("/api/projects", Some(&alice)).await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_reports_database() {
	let app = TestApp::new().await;
	let response = app.get("/health", None).await;
	assert_eq!(response.status(), StatusCode::OK);

	let json = body_json(response).await;
	assert_eq!(json["status"], "healthy");
	assert_eq!(json["database"]["status"], "healthy");
}
