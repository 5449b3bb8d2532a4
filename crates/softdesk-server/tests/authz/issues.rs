// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for issue routes.
//!
//! Members may list, read and file issues. Only the author may change or
//! delete one, and the project owner is no exception.

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::support::{body_json, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn outsiders_cannot_touch_issues() {
	let app = TestApp::new().await;
	let list_path = format!("{}/issues", app.fixtures.project_path());
	let issue_path = app.fixtures.issue_path();
	let carol = Some(app.fixtures.carol.clone());
	let cases = [
		AuthzCase {
			name: "outsider_cannot_list_issues",
			method: Method::GET,
			path: list_path.clone(),
			user: carol.clone(),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "outsider_cannot_create_issue",
			method: Method::POST,
			path: list_path.clone(),
			user: carol.clone(),
			body: Some(json!({"title": "Spam", "description": "x"})),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "outsider_cannot_read_issue",
			method: Method::GET,
			path: issue_path.clone(),
			user: carol.clone(),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "outsider_cannot_delete_issue",
			method: Method::DELETE,
			path: issue_path.clone(),
			user: carol,
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "anonymous_cannot_list_issues",
			method: Method::GET,
			path: list_path,
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "anonymous_cannot_read_issue",
			method: Method::GET,
			path: issue_path,
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn members_read_and_file_issues() {
	let app = TestApp::new().await;
	let list_path = format!("{}/issues", app.fixtures.project_path());
	let cases = [
		AuthzCase {
			name: "owner_lists_issues",
			method: Method::GET,
			path: list_path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "owner_reads_contributors_issue",
			method: Method::GET,
			path: app.fixtures.issue_path(),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "contributor_files_issue",
			method: Method::POST,
			path: list_path.clone(),
			user: Some(app.fixtures.bob.clone()),
			body: Some(json!({"title": "Crash", "description": "On save", "priority": "HIGH", "tag": "BUG"})),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "owner_files_issue",
			method: Method::POST,
			path: list_path,
			user: Some(app.fixtures.alice.clone()),
			body: Some(json!({"title": "Docs", "description": "Write them", "tag": "TASK"})),
			expected_status: StatusCode::CREATED,
		},
	];
	run_authz_cases(&app, &cases).await;
}

/// Alice owns Alpha, Bob files "Login bug". Alice cannot delete it, Bob can.
#[tokio::test]
async fn alpha_scenario_author_only_delete() {
	let app = TestApp::new().await;
	let issue_path = app.fixtures.issue_path();
	let cases = [
		AuthzCase {
			name: "owner_cannot_update_others_issue",
			method: Method::PATCH,
			path: issue_path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: Some(json!({"status": "FINISHED"})),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "owner_cannot_delete_others_issue",
			method: Method::DELETE,
			path: issue_path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "author_updates_issue",
			method: Method::PATCH,
			path: issue_path.clone(),
			user: Some(app.fixtures.bob.clone()),
			body: Some(json!({"status": "IN_PROGRESS"})),
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "author_deletes_issue",
			method: Method::DELETE,
			path: issue_path.clone(),
			user: Some(app.fixtures.bob.clone()),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "deleted_issue_is_gone",
			method: Method::GET,
			path: issue_path,
			user: Some(app.fixtures.bob.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn author_who_left_project_cannot_edit() {
	let app = TestApp::new().await;
	let remove = app
		.delete(
			&format!(
				"{}/contributors/{}",
				app.fixtures.project_path(),
				app.fixtures.bob.user.id
			),
			Some(&app.fixtures.alice),
		)
		.await;
	assert_eq!(remove.status(), StatusCode::NO_CONTENT);

	let response = app
		.patch(
			&app.fixtures.issue_path(),
			Some(&app.fixtures.bob),
			json!({"title": "Still mine?"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn author_is_stamped_from_caller() {
	let app = TestApp::new().await;
	let response = app
		.post(
			&format!("{}/issues", app.fixtures.project_path()),
			Some(&app.fixtures.bob),
			json!({"title": "Slow page", "description": "Takes 10s"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);

	let json = body_json(response).await;
	assert_eq!(json["author_id"], app.fixtures.bob.user.id.to_string());
	assert_eq!(json["priority"], "MEDIUM");
	assert_eq!(json["status"], "TO_DO");
}

#[tokio::test]
async fn assignee_must_be_a_member() {
	let app = TestApp::new().await;
	let list_path = format!("{}/issues", app.fixtures.project_path());

	let response = app
		.post(
			&list_path,
			Some(&app.fixtures.bob),
			json!({"title": "T", "description": "D", "assigned_to": app.fixtures.carol.user.id}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	let json = body_json(response).await;
	assert_eq!(json["field"], "assigned_to");

	let response = app
		.post(
			&list_path,
			Some(&app.fixtures.bob),
			json!({"title": "T", "description": "D", "assigned_to": app.fixtures.alice.user.id}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn null_assignee_clears_assignment() {
	let app = TestApp::new().await;
	let issue_path = app.fixtures.issue_path();

	let response = app
		.patch(
			&issue_path,
			Some(&app.fixtures.bob),
			json!({"assigned_to": app.fixtures.alice.user.id}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		body_json(response).await["assigned_to"],
		app.fixtures.alice.user.id.to_string()
	);

	let response = app
		.patch(&issue_path, Some(&app.fixtures.bob), json!({"assigned_to": null}))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	assert!(body_json(response).await["assigned_to"].is_null());
}

#[tokio::test]
async fn issue_from_another_project_is_not_found() {
	let app = TestApp::new().await;
	let other = app
		.post(
			"/api/projects",
			Some(&app.fixtures.bob),
			json!({"name": "Beta", "description": "Bob's", "type": "Android"}),
		)
		.await;
	assert_eq!(other.status(), StatusCode::CREATED);
	let beta_id = body_json(other).await["id"].as_str().unwrap().to_string();

	let response = app
		.get(
			&format!("/api/projects/{beta_id}/issues/{}", app.fixtures.login_bug.id),
			Some(&app.fixtures.bob),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn issue_detail_names_comments() {
	let app = TestApp::new().await;
	let response = app
		.get(&app.fixtures.issue_path(), Some(&app.fixtures.alice))
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let json = body_json(response).await;
	assert_eq!(json["comment_count"], 1);
	assert_eq!(json["comment_titles"][0], "Repro");
}
