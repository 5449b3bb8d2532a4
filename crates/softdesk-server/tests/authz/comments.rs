// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for comment routes.

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::support::{body_json, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn membership_gates_comments() {
	let app = TestApp::new().await;
	let list_path = format!("{}/comments", app.fixtures.issue_path());
	let cases = [
		AuthzCase {
			name: "owner_lists_comments",
			method: Method::GET,
			path: list_path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "owner_comments_on_contributors_issue",
			method: Method::POST,
			path: list_path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: Some(json!({"name": "Ack", "description": "Looking into it"})),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "outsider_cannot_list_comments",
			method: Method::GET,
			path: list_path.clone(),
			user: Some(app.fixtures.carol.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "outsider_cannot_comment",
			method: Method::POST,
			path: list_path.clone(),
			user: Some(app.fixtures.carol.clone()),
			body: Some(json!({"name": "Hi", "description": "x"})),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "outsider_cannot_read_comment",
			method: Method::GET,
			path: app.fixtures.comment_path(),
			user: Some(app.fixtures.carol.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "anonymous_cannot_list_comments",
			method: Method::GET,
			path: list_path,
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn only_author_mutates_comment() {
	let app = TestApp::new().await;
	let path = app.fixtures.comment_path();
	let cases = [
		AuthzCase {
			name: "owner_reads_comment",
			method: Method::GET,
			path: path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "owner_cannot_edit_comment",
			method: Method::PATCH,
			path: path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: Some(json!({"description": "edited"})),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "owner_cannot_delete_comment",
			method: Method::DELETE,
			path: path.clone(),
			user: Some(app.fixtures.alice.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "author_edits_comment",
			method: Method::PATCH,
			path: path.clone(),
			user: Some(app.fixtures.bob.clone()),
			body: Some(json!({"description": "Only on Firefox"})),
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "author_deletes_comment",
			method: Method::DELETE,
			path: path.clone(),
			user: Some(app.fixtures.bob.clone()),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "deleted_comment_is_gone",
			method: Method::GET,
			path,
			user: Some(app.fixtures.bob.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn comment_under_wrong_issue_is_not_found() {
	let app = TestApp::new().await;
	let created = app
		.post(
			&format!("{}/issues", app.fixtures.project_path()),
			Some(&app.fixtures.bob),
			json!({"title": "Other", "description": "x"}),
		)
		.await;
	assert_eq!(created.status(), StatusCode::CREATED);
	let other_issue = body_json(created).await["id"].as_str().unwrap().to_string();

	let response = app
		.get(
			&format!(
				"{}/issues/{other_issue}/comments/{}",
				app.fixtures.project_path(),
				app.fixtures.bob_comment.id
			),
			Some(&app.fixtures.bob),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_comment_name_is_rejected() {
	let app = TestApp::new().await;
	let response = app
		.post(
			&format!("{}/comments", app.fixtures.issue_path()),
			Some(&app.fixtures.bob),
			json!({"name": "", "description": "x"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await["field"], "name");
}
