use obs_websocket::ObsWebsocketError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
	#[error("Configuration error: {0}")]
	Config(String),

	#[error("Failed to read streaming profile {}: {source}", .path.display())]
	ProfileRead { path: PathBuf, source: std::io::Error },

	#[error("Invalid streaming profile {}: {reason}", .path.display())]
	ProfileFormat { path: PathBuf, reason: String },

	#[error("Failed to execute ImageFlux API: {0}")]
	Network(#[from] reqwest::Error),

	#[error("ImageFlux API returned {status}: {body}")]
	ApiStatus { status: reqwest::StatusCode, body: String },

	#[error("Failed to decode ImageFlux API response: {0}")]
	Decode(#[source] serde_json::Error),

	#[error("Channel ID is empty in the ImageFlux API response")]
	EmptyChannelId,

	#[error("Failed to connect to OBS: {0}")]
	Connection(#[source] ObsWebsocketError),

	#[error("OBS {operation} failed: {source}")]
	Rpc { operation: &'static str, source: ObsWebsocketError },
}

impl Error {
	pub(crate) fn rpc(operation: &'static str) -> impl FnOnce(ObsWebsocketError) -> Self {
		move |source| Self::Rpc { operation, source }
	}

	/// Process exit status for this failure
	pub fn exit_code(&self) -> u8 {
		match self {
			Self::Config(_) | Self::ProfileRead { .. } | Self::ProfileFormat { .. } => 2,
			_ => 1,
		}
	}
}
