// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for project routes.
//!
//! - Anonymous callers get 401 before anything is looked up
//! - Owner and contributors may read a project; outsiders get 403
//! - Only the owner may update or delete it
//! - Administrators gain nothing on projects they are not part of

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::support::{body_json, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn anonymous_requests_are_rejected() {
	let app = TestApp::new().await;
	let path = app.fixtures.project_path();
	let cases = [
		AuthzCase {
			name: "anonymous_list_projects",
			method: Method::GET,
			path: "/api/projects".to_string(),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "anonymous_create_project",
			method: Method::POST,
			path: "/api/projects".to_string(),
			user: None,
			body: Some(json!({"name": "Gamma", "description": "x", "type": "Backend"})),
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "anonymous_get_project",
			method: Method::GET,
			path: path.clone(),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "anonymous_delete_project",
			method: Method::DELETE,
			path,
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn read_access_follows_membership() {
	let app = TestApp::new().await;
	let path = app.fixtures.project_path();
	let cases = [
		AuthzCase {
			name: "owner_reads_project",
			method: Method::GET,
			path: path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "contributor_reads_project",
			method: Method::GET,
			path: path.clone(),
			user: Some(app.fixtures.bob.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "outsider_cannot_read_project",
			method: Method::GET,
			path: path.clone(),
			user: Some(app.fixtures.carol.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "admin_cannot_read_foreign_project",
			method: Method::GET,
			path,
			user: Some(app.fixtures.admin.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn only_owner_mutates_project() {
	let app = TestApp::new().await;
	let path = app.fixtures.project_path();
	let rename = json!({"name": "Alpha Prime"});
	let cases = [
		AuthzCase {
			name: "contributor_cannot_update_project",
			method: Method::PATCH,
			path: path.clone(),
			user: Some(app.fixtures.bob.clone()),
			body: Some(rename.clone()),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "outsider_cannot_update_project",
			method: Method::PATCH,
			path: path.clone(),
			user: Some(app.fixtures.carol.clone()),
			body: Some(rename.clone()),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "contributor_cannot_delete_project",
			method: Method::DELETE,
			path: path.clone(),
			user: Some(app.fixtures.bob.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "owner_updates_project",
			method: Method::PATCH,
			path: path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: Some(rename),
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "owner_deletes_project",
			method: Method::DELETE,
			path: path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "deleted_project_is_gone",
			method: Method::GET,
			path,
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn malformed_and_unknown_ids() {
	let app = TestApp::new().await;
	let cases = [
		AuthzCase {
			name: "malformed_project_id",
			method: Method::GET,
			path: "/api/projects/42".to_string(),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::BAD_REQUEST,
		},
		AuthzCase {
			name: "unknown_project_id",
			method: Method::GET,
			path: format!("/api/projects/{}", uuid::Uuid::new_v4()),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn creator_becomes_owner() {
	let app = TestApp::new().await;
	let response = app
		.post(
			"/api/projects",
			Some(&app.fixtures.carol),
			json!({"name": "Gamma", "description": "Carol's", "type": "iOS"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);

	let json = body_json(response).await;
	assert_eq!(json["owner_id"], app.fixtures.carol.user.id.to_string());
	assert_eq!(json["type"], "iOS");
}

#[tokio::test]
async fn invalid_project_type_names_the_field() {
	let app = TestApp::new().await;
	let response = app
		.post(
			"/api/projects",
			Some(&app.fixtures.carol),
			json!({"name": "Gamma", "description": "x", "type": "Desktop"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let json = body_json(response).await;
	assert_eq!(json["error"], "validation_error");
	assert_eq!(json["field"], "type");
}

#[tokio::test]
async fn list_is_scoped_to_membership() {
	let app = TestApp::new().await;
	let alpha_id = app.fixtures.alpha.id.to_string();

	let bob = body_json(app.get("/api/projects", Some(&app.fixtures.bob)).await).await;
	let bob_sees_alpha = bob["projects"]
		.as_array()
		.unwrap()
		.iter()
		.any(|p| p["id"] == alpha_id.as_str());
	assert!(bob_sees_alpha, "contributor should see Alpha");

	let carol = body_json(app.get("/api/projects", Some(&app.fixtures.carol)).await).await;
	assert!(
		carol["projects"].as_array().unwrap().is_empty(),
		"outsider should see no projects"
	);
}

#[tokio::test]
async fn detail_lists_contributors_and_issue_titles() {
	let app = TestApp::new().await;
	let response = app
		.get(&app.fixtures.project_path(), Some(&app.fixtures.bob))
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let json = body_json(response).await;
	assert_eq!(json["issues_count"], 1);
	assert_eq!(json["issue_titles"][0]["title"], "Login bug");
	assert_eq!(json["contributors"][0]["username"], "bob");
}

#[tokio::test]
async fn project_delete_cascades_to_children() {
	let app = TestApp::new().await;
	let response = app
		.delete(&app.fixtures.project_path(), Some(&app.fixtures.alice))
		.await;
	assert_eq!(response.status(), StatusCode::NO_CONTENT);

	let issue = app
		.state
		.issue_repo
		.get_issue_by_id(&app.fixtures.login_bug.id)
		.await
		.unwrap();
	assert!(issue.is_none());
	let comment = app
		.state
		.comment_repo
		.get_comment_by_id(&app.fixtures.bob_comment.id)
		.await
		.unwrap();
	assert!(comment.is_none());
	assert!(!app
		.state
		.project_repo
		.is_contributor(&app.fixtures.alpha.id, &app.fixtures.bob.user.id)
		.await
		.unwrap());
}
