use crate::error::{Error, Result};
use crate::profile::StreamingProfile;
use obs_websocket::ObsConfig;
use std::fmt;
use std::path::PathBuf;

pub const OBS_ADDRESS_VAR: &str = "OBS_WEBSOCKET_ADDRESS";
pub const OBS_PASSWORD_VAR: &str = "OBS_WEBSOCKET_PASSWORD";
pub const AUTH_KEY_VAR: &str = "IMAGE_FLUX_AUTH_KEY";
pub const PROFILE_VAR: &str = "IMAGE_FLUX_PROFILE";

pub const DEFAULT_OBS_ADDRESS: &str = "localhost:4455";

/// Bearer token for the ImageFlux API, kept out of logs
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for BearerToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("BearerToken([REDACTED])")
	}
}

/// Process environment lookup, after `.env` has been loaded
pub fn env_var(key: &str) -> Option<String> {
	std::env::var(key).ok()
}

/// Everything a run needs, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
	pub obs: ObsConfig,
	pub auth_key: BearerToken,
	/// JSON file replacing the built-in rendition ladder
	pub profile_path: Option<PathBuf>,
}

impl Config {
	/// Read configuration through `lookup`; see [`env_var`] for the process
	/// environment.
	pub fn from_lookup<F>(lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let auth_key = lookup(AUTH_KEY_VAR)
			.filter(|key| !key.trim().is_empty())
			.ok_or_else(|| Error::Config(format!("{AUTH_KEY_VAR} environment variable is not set")))?;

		let address = lookup(OBS_ADDRESS_VAR).filter(|a| !a.trim().is_empty()).unwrap_or_else(|| DEFAULT_OBS_ADDRESS.to_string());
		// an empty password is passed through; OBS decides whether it needs one
		let password = lookup(OBS_PASSWORD_VAR).unwrap_or_default();
		let obs = ObsConfig::from_address(&address, password).map_err(|e| Error::Config(e.to_string()))?;

		Ok(Self {
			obs,
			auth_key: BearerToken::new(auth_key),
			profile_path: lookup(PROFILE_VAR).filter(|p| !p.trim().is_empty()).map(PathBuf::from),
		})
	}

	/// The configured ladder, or the built-in one
	pub fn streaming_profile(&self) -> Result<StreamingProfile> {
		match &self.profile_path {
			Some(path) => StreamingProfile::from_file(path),
			None => Ok(StreamingProfile::default()),
		}
	}
}
