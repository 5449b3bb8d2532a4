// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for contributor routes.

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::support::{body_json, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn members_list_contributors_outsiders_do_not() {
	let app = TestApp::new().await;
	let path = format!("{}/contributors", app.fixtures.project_path());
	let cases = [
		AuthzCase {
			name: "owner_lists_contributors",
			method: Method::GET,
			path: path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "contributor_lists_contributors",
			method: Method::GET,
			path: path.clone(),
			user: Some(app.fixtures.bob.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "outsider_cannot_list_contributors",
			method: Method::GET,
			path: path.clone(),
			user: Some(app.fixtures.carol.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "anonymous_cannot_list_contributors",
			method: Method::GET,
			path,
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn only_owner_manages_contributors() {
	let app = TestApp::new().await;
	let path = format!("{}/contributors", app.fixtures.project_path());
	let carol_id = app.fixtures.carol.user.id.to_string();
	let cases = [
		AuthzCase {
			name: "contributor_cannot_add",
			method: Method::POST,
			path: path.clone(),
			user: Some(app.fixtures.bob.clone()),
			body: Some(json!({"user_id": carol_id})),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "outsider_cannot_add_self",
			method: Method::POST,
			path: path.clone(),
			user: Some(app.fixtures.carol.clone()),
			body: Some(json!({"user_id": carol_id})),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "owner_adds_carol",
			method: Method::POST,
			path: path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: Some(json!({"user_id": carol_id})),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "duplicate_edge_conflicts",
			method: Method::POST,
			path: path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: Some(json!({"user_id": carol_id})),
			expected_status: StatusCode::CONFLICT,
		},
		AuthzCase {
			name: "owner_cannot_be_contributor",
			method: Method::POST,
			path: path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: Some(json!({"user_id": app.fixtures.alice.user.id.to_string()})),
			expected_status: StatusCode::BAD_REQUEST,
		},
		AuthzCase {
			name: "unknown_user_not_found",
			method: Method::POST,
			path: path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: Some(json!({"user_id": uuid::Uuid::new_v4().to_string()})),
			expected_status: StatusCode::NOT_FOUND,
		},
		AuthzCase {
			name: "contributor_cannot_remove",
			method: Method::DELETE,
			path: format!("{path}/{carol_id}"),
			user: Some(app.fixtures.bob.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "owner_removes_carol",
			method: Method::DELETE,
			path: format!("{path}/{carol_id}"),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "removing_twice_is_not_found",
			method: Method::DELETE,
			path: format!("{path}/{carol_id}"),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn added_contributor_gains_read_access() {
	let app = TestApp::new().await;
	let project_path = app.fixtures.project_path();

	let before = app.get(&project_path, Some(&app.fixtures.carol)).await;
	assert_eq!(before.status(), StatusCode::FORBIDDEN);

	let response = app
		.post(
			&format!("{project_path}/contributors"),
			Some(&app.fixtures.alice),
			json!({"user_id": app.fixtures.carol.user.id}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let json = body_json(response).await;
	assert_eq!(json["username"], "carol");

	let after = app.get(&project_path, Some(&app.fixtures.carol)).await;
	assert_eq!(after.status(), StatusCode::OK);
}

#[tokio::test]
async fn get_contributor_by_user_id() {
	let app = TestApp::new().await;
	let bob_path = format!(
		"{}/contributors/{}",
		app.fixtures.project_path(),
		app.fixtures.bob.user.id
	);

	let response = app.get(&bob_path, Some(&app.fixtures.alice)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let json = body_json(response).await;
	assert_eq!(json["user_id"], app.fixtures.bob.user.id.to_string());

	let carol_path = format!(
		"{}/contributors/{}",
		app.fixtures.project_path(),
		app.fixtures.carol.user.id
	);
	let response = app.get(&carol_path, Some(&app.fixtures.alice)).await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
