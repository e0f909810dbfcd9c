//! HTTP server for the ordering assistant.
//!
//! This module provides the minimal HTTP surface of the service: a single
//! `POST /chat` endpoint taking one conversational turn per request. The
//! user identifier travels in the `user-id` header and defaults to a fixed
//! sentinel when absent.

use axum::{
	extract::State,
	http::HeaderMap,
	response::Json,
	routing::post,
	Router,
};
use orderbot_config::ServerConfig;
use orderbot_core::DialogueEngine;
use orderbot_types::{ChatRequest, ChatResponse, DEFAULT_USER_ID, USER_ID_HEADER};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Reference to the dialogue engine processing turns.
	pub engine: Arc<DialogueEngine>,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/chat", post(handle_chat))
		.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
		.with_state(state)
}

/// Starts the HTTP server for the chat API.
pub async fn start_server(
	server_config: ServerConfig,
	engine: Arc<DialogueEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = router(AppState { engine });

	let bind_address = format!("{}:{}", server_config.host, server_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Ordering assistant API listening on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Handles POST /chat requests.
///
/// One request is one conversational turn: the engine classifies the
/// payload against the caller's session and replies with a message, the
/// menu, or both. The engine recovers every error internally, so this
/// handler is infallible.
async fn handle_chat(
	State(state): State<AppState>,
	headers: HeaderMap,
	Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
	let user_id = headers
		.get(USER_ID_HEADER)
		.and_then(|value| value.to_str().ok())
		.unwrap_or(DEFAULT_USER_ID);

	Json(state.engine.handle_turn(user_id, &request).await)
}
