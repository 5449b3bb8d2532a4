// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for user account routes.
//!
//! - Registration is open to anonymous callers
//! - Only admins list accounts
//! - A profile is visible to and editable by its owner and admins
//! - Deleting an account hands its projects to the fallback admin

use axum::http::{Method, StatusCode};
use serde_json::json;
use softdesk_server_config::ServerConfig;

use super::support::{body_json, run_authz_cases, AuthzCase, TestApp};

fn registration(username: &str) -> serde_json::Value {
	json!({
		"username": username,
		"password": "s3cret-pass",
		"date_of_birth": "1995-03-01",
		"can_be_contacted": true,
	})
}

#[tokio::test]
async fn registration_is_open() {
	let app = TestApp::new().await;
	let cases = [
		AuthzCase {
			name: "anonymous_registers",
			method: Method::POST,
			path: "/api/users".to_string(),
			user: None,
			body: Some(registration("dave")),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "duplicate_username_conflicts",
			method: Method::POST,
			path: "/api/users".to_string(),
			user: None,
			body: Some(registration("dave")),
			expected_status: StatusCode::CONFLICT,
		},
		AuthzCase {
			name: "underage_registration_rejected",
			method: Method::POST,
			path: "/api/users".to_string(),
			user: None,
			body: Some(json!({
				"username": "kid",
				"password": "s3cret-pass",
				"date_of_birth": chrono::Utc::now().date_naive().to_string(),
			})),
			expected_status: StatusCode::BAD_REQUEST,
		},
		AuthzCase {
			name: "invalid_username_rejected",
			method: Method::POST,
			path: "/api/users".to_string(),
			user: None,
			body: Some(registration("no spaces allowed")),
			expected_status: StatusCode::BAD_REQUEST,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn registration_never_grants_admin() {
	let app = TestApp::new().await;
	let mut body = registration("eve");
	body["is_admin"] = json!(true);

	let response = app.post("/api/users", None, body).await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let json = body_json(response).await;
	assert_eq!(json["is_admin"], false);
	assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn disabled_signups_are_forbidden() {
	let mut config = ServerConfig::default();
	config.auth.signups_disabled = true;
	let app = TestApp::with_config(config).await;

	let response = app.post("/api/users", None, registration("frank")).await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn directory_is_admin_only() {
	let app = TestApp::new().await;
	let cases = [
		AuthzCase {
			name: "admin_lists_users",
			method: Method::GET,
			path: "/api/users".to_string(),
			user: Some(app.fixtures.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "user_cannot_list_users",
			method: Method::GET,
			path: "/api/users".to_string(),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "anonymous_cannot_list_users",
			method: Method::GET,
			path: "/api/users".to_string(),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn profiles_belong_to_self_and_admins() {
	let app = TestApp::new().await;
	let alice_path = format!("/api/users/{}", app.fixtures.alice.user.id);
	let cases = [
		AuthzCase {
			name: "self_reads_profile",
			method: Method::GET,
			path: alice_path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "admin_reads_profile",
			method: Method::GET,
			path: alice_path.clone(),
			user: Some(app.fixtures.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "other_user_cannot_read_profile",
			method: Method::GET,
			path: alice_path.clone(),
			user: Some(app.fixtures.bob.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "other_user_cannot_update_profile",
			method: Method::PATCH,
			path: alice_path.clone(),
			user: Some(app.fixtures.bob.clone()),
			body: Some(json!({"can_be_contacted": true})),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "other_user_cannot_delete_account",
			method: Method::DELETE,
			path: alice_path.clone(),
			user: Some(app.fixtures.carol.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "self_updates_consents",
			method: Method::PATCH,
			path: alice_path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: Some(json!({"can_data_be_shared": true})),
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "malformed_user_id",
			method: Method::GET,
			path: "/api/users/alice".to_string(),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::BAD_REQUEST,
		},
	];
	run_authz_cases(&app, &cases).await;
}

/// Bob owns Beta and authored "Login bug" in Alice's Alpha. Deleting Bob
/// hands Beta to the admin and the issue to Alice.
#[tokio::test]
async fn deleting_account_reassigns_ownership() {
	let app = TestApp::new().await;
	let beta = app
		.post(
			"/api/projects",
			Some(&app.fixtures.bob),
			json!({"name": "Beta", "description": "Bob's", "type": "Frontend"}),
		)
		.await;
	assert_eq!(beta.status(), StatusCode::CREATED);
	let beta_id = body_json(beta).await["id"].as_str().unwrap().to_string();

	let response = app
		.delete(
			&format!("/api/users/{}", app.fixtures.bob.user.id),
			Some(&app.fixtures.bob),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NO_CONTENT);

	let beta = app
		.get(&format!("/api/projects/{beta_id}"), Some(&app.fixtures.admin))
		.await;
	assert_eq!(beta.status(), StatusCode::OK);
	assert_eq!(
		body_json(beta).await["owner_id"],
		app.fixtures.admin.user.id.to_string()
	);

	let issue = app
		.get(&app.fixtures.issue_path(), Some(&app.fixtures.alice))
		.await;
	assert_eq!(issue.status(), StatusCode::OK);
	assert_eq!(
		body_json(issue).await["author_id"],
		app.fixtures.alice.user.id.to_string()
	);

	let gone = app
		.get(
			&format!("/api/users/{}", app.fixtures.bob.user.id),
			Some(&app.fixtures.admin),
		)
		.await;
	assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_account_token_stops_working() {
	let app = TestApp::new().await;
	let response = app
		.delete(
			&format!("/api/users/{}", app.fixtures.carol.user.id),
			Some(&app.fixtures.carol),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NO_CONTENT);

	let response = app.get("/api/projects", Some(&app.fixtures.carol)).await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sole_admin_cannot_delete_self() {
	let app = TestApp::new().await;
	let admin_path = format!("/api/users/{}", app.fixtures.admin.user.id);

	let response = app.delete(&admin_path, Some(&app.fixtures.admin)).await;
	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body_json(response).await["error"], "configuration_error");

	let still_there = app.get(&admin_path, Some(&app.fixtures.admin)).await;
	assert_eq!(still_there.status(), StatusCode::OK);
}
