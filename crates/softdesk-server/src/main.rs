// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SoftDesk server binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use softdesk_server::{create_app_state, create_router};
use softdesk_server_config::{LoggingConfig, ServerConfig};
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// SoftDesk server - project and issue tracker API.
#[derive(Parser, Debug)]
#[command(name = "softdesk-server", about = "SoftDesk project and issue tracker", version)]
struct Args {
	/// Path to a TOML config file, overriding /etc/softdesk/server.toml
	#[arg(long, env = "SOFTDESK_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
	/// Create an administrator account
	CreateAdmin {
		#[arg(long)]
		username: String,
		#[arg(long)]
		password: String,
		/// Date of birth, YYYY-MM-DD
		#[arg(long)]
		date_of_birth: NaiveDate,
	},
}

fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| logging.level.clone().into());
	let registry = tracing_subscriber::registry().with(filter);

	if logging.json {
		registry
			.with(tracing_subscriber::fmt::layer().json())
			.init();
	} else {
		registry.with(tracing_subscriber::fmt::layer()).init();
	}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("softdesk-server {}", env!("CARGO_PKG_VERSION"));
		return Ok(());
	}

	dotenvy::dotenv().ok();

	let config: ServerConfig = match &args.config {
		Some(path) => softdesk_server_config::load_config_with_file(path)?,
		None => softdesk_server_config::load_config()?,
	};

	init_tracing(&config.logging);

	let pool = softdesk_server_db::create_pool(&config.database.url).await?;
	softdesk_server_db::run_migrations(&pool).await?;

	let state = create_app_state(pool.clone(), &config);

	if let Some(Command::CreateAdmin {
		username,
		password,
		date_of_birth,
	}) = args.command
	{
		let admin = state
			.users
			.create_admin(&username, &password, date_of_birth)
			.await?;
		tracing::info!(user_id = %admin.id, username = %admin.username, "admin created");
		println!("created admin {} ({})", admin.username, admin.id);
		return Ok(());
	}

	let expired = state.session_repo.cleanup_expired_sessions().await?;
	if expired > 0 {
		tracing::info!(count = expired, "removed expired sessions");
	}

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		"starting softdesk-server"
	);

	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("received shutdown signal");
		}
	}

	tracing::info!("server shutdown complete");
	Ok(())
}
