use crate::ObsWebsocketError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PORT: u16 = 4455;

#[derive(Clone, Serialize, Deserialize)]
pub struct ObsConfig {
	pub host: String,
	pub port: u16,
	pub password: String,
}

impl ObsConfig {
	/// Builds a config from `host`, `host:port` or `ws://host:port`.
	pub fn from_address(address: &str, password: impl Into<String>) -> Result<Self, ObsWebsocketError> {
		let trimmed = address.trim();
		let authority = trimmed.strip_prefix("ws://").unwrap_or(trimmed).trim_end_matches('/');

		if authority.is_empty() {
			return Err(ObsWebsocketError::Config("OBS WebSocket address is empty".to_string()));
		}

		let (host, port) = match authority.rsplit_once(':') {
			Some((host, port)) => {
				let port = port
					.parse::<u16>()
					.map_err(|e| ObsWebsocketError::Config(format!("invalid port in OBS WebSocket address '{address}': {e}")))?;
				(host, port)
			}
			None => (authority, DEFAULT_PORT),
		};

		if host.is_empty() {
			return Err(ObsWebsocketError::Config(format!("missing host in OBS WebSocket address '{address}'")));
		}

		Ok(Self {
			host: host.to_string(),
			port,
			password: password.into(),
		})
	}

	pub fn url(&self) -> String {
		format!("ws://{}:{}", self.host, self.port)
	}
}

impl Default for ObsConfig {
	fn default() -> Self {
		Self {
			host: "localhost".to_string(),
			port: DEFAULT_PORT,
			password: String::new(),
		}
	}
}

impl fmt::Debug for ObsConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ObsConfig")
			.field("host", &self.host)
			.field("port", &self.port)
			.field("password", &"[REDACTED]")
			.finish()
	}
}
