// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SoftDesk HTTP server.
//!
//! Serves the project, contributor, issue and comment tracker over JSON.
//! Handlers parse path ids and hand off to [`services`], which resolve the
//! caller's roles against the addressed resource before touching the store.

pub mod api;
pub mod auth_middleware;
pub mod error;
pub mod routes;
pub mod services;
pub mod validation;

pub use api::{create_app_state, create_router, AppState};
pub use error::ServerError;
pub use softdesk_server_config::ServerConfig;
