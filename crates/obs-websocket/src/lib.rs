// obs-websocket Library
//
// Request/response client for the OBS WebSocket v5 protocol. It owns the
// handshake, authentication and request framing so callers only deal with
// typed requests.

use thiserror::Error;

mod auth;
mod client;
mod config;
mod types;

pub use auth::SessionInfo;
pub use client::ObsClient;
pub use config::{ObsConfig, DEFAULT_PORT};
pub use types::{ObsRequestType, StreamServiceSettings, VersionInfo};

/// RPC version requested during Identify
pub const RPC_VERSION: u32 = 1;

/// Version of this client library
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors for obs-websocket crate
#[derive(Debug, Error)]
pub enum ObsWebsocketError {
	#[error("Connection error: {0}")]
	Connection(#[from] tokio_tungstenite::tungstenite::Error),

	#[error("Authentication failed: {0}")]
	Authentication(String),

	#[error("Connection closed by OBS ({code}): {reason}")]
	Closed { code: u16, reason: String },

	#[error("Not connected to OBS")]
	NotConnected,

	#[error("{request_type} failed with status {code}: {comment}")]
	RequestFailed { request_type: ObsRequestType, code: u16, comment: String },

	#[error("Protocol error: {0}")]
	Protocol(String),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid configuration: {0}")]
	Config(String),
}
