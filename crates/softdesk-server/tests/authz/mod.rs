// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod auth;
mod comments;
mod contributors;
mod issues;
mod projects;
mod support;
mod users;
