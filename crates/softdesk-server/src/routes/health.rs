// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Liveness endpoint.

use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use sqlx::SqlitePool;
use tokio::time::{timeout, Instant};

use crate::api::AppState;

const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
	Healthy,
	Unhealthy,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseHealth {
	pub status: HealthStatus,
	pub latency_ms: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
	pub status: HealthStatus,
	pub timestamp: String,
	pub version: &'static str,
	pub database: DatabaseHealth,
}

async fn check_database(pool: &SqlitePool) -> DatabaseHealth {
	let start = Instant::now();
	let result = timeout(DB_CHECK_TIMEOUT, sqlx::query("SELECT 1").execute(pool)).await;
	let latency_ms = start.elapsed().as_millis() as u64;

	let (status, error) = match result {
		Ok(Ok(_)) => (HealthStatus::Healthy, None),
		Ok(Err(e)) => (HealthStatus::Unhealthy, Some(e.to_string())),
		Err(_) => (
			HealthStatus::Unhealthy,
			Some("database health check timed out".to_string()),
		),
	};

	DatabaseHealth {
		status,
		latency_ms,
		error,
	}
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let database = check_database(&state.pool).await;
	let status = database.status;
	if status == HealthStatus::Unhealthy {
		tracing::warn!(error = ?database.error, "health check failed");
	}

	let response = HealthResponse {
		status,
		timestamp: chrono::Utc::now().to_rfc3339(),
		version: env!("CARGO_PKG_VERSION"),
		database,
	};

	let http_status = match status {
		HealthStatus::Healthy => StatusCode::OK,
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
	};

	(http_status, Json(response))
}
