// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request and response bodies for the SoftDesk HTTP API.
//!
//! Choice fields (project type, priority, tag, status) arrive as plain strings
//! so an unknown value can be reported against its field instead of failing
//! the whole body.

pub mod auth;
pub mod comments;
pub mod contributors;
pub mod error;
pub mod issues;
pub mod projects;
mod serde_ext;
pub mod users;

pub use auth::{LoginRequest, TokenResponse};
pub use comments::{CommentResponse, CreateCommentRequest, ListCommentsResponse, UpdateCommentRequest};
pub use contributors::{AddContributorRequest, ContributorResponse, ListContributorsResponse};
pub use error::ErrorResponse;
pub use issues::{
	CreateIssueRequest, IssueDetailResponse, IssueResponse, ListIssuesResponse, UpdateIssueRequest,
};
pub use projects::{
	CreateProjectRequest, IssueTitleResponse, ListProjectsResponse, ProjectContributorSummary,
	ProjectDetailResponse, ProjectResponse, UpdateProjectRequest,
};
pub use users::{ListUsersResponse, RegisterRequest, UpdateUserRequest, UserResponse};
