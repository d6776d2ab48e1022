//! HTTP control surface under `/api`.

mod routes;

use std::net::SocketAddr;

use adbflow::Engine;
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use routes::ApiError;

/// Builds the router. Request handlers never wait on device work; `start`
/// only spawns the loop.
pub fn router(engine: Engine) -> Router {
	let api = Router::new()
		.route("/adb-devices", get(routes::list_devices))
		.route("/open-wa-link", post(routes::open_link))
		.route("/open-link", post(routes::open_link))
		.route("/start", post(routes::start))
		.route("/stop", post(routes::stop))
		.route("/status", get(routes::status));

	Router::new()
		.nest("/api", api)
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.with_state(engine)
}

/// Serves until Ctrl-C, then stops the session loop and waits for its pass
/// to finish.
pub async fn serve(engine: Engine, addr: SocketAddr) -> Result<()> {
	let listener = TcpListener::bind(addr)
		.await
		.with_context(|| format!("Failed to bind control server to {addr}"))?;
	info!(target = "adbflow.server", %addr, links = engine.links().len(), "control server listening");

	axum::serve(listener, router(engine.clone()))
		.with_graceful_shutdown(shutdown_signal())
		.await
		.context("Control server error")?;

	info!(target = "adbflow.server", "shutting down");
	engine.shutdown().await;
	Ok(())
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		tracing::warn!(target = "adbflow.server", error = %err, "failed to listen for Ctrl-C");
		std::future::pending::<()>().await;
	}
}
