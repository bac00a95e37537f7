use crate::config::BearerToken;
use crate::error::{Error, Result};
use crate::profile::StreamingProfile;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

pub const IMAGE_FLUX_API_URL: &str = "https://live-api.imageflux.jp/";
pub const CREATE_CHANNEL_TARGET: &str = "ImageFlux_20200316.CreateMultistreamChannelWithHLS";

/// Response of `CreateMultistreamChannelWithHLS`.
///
/// Missing fields decode as empty strings so that an absent id is reported
/// as [`Error::EmptyChannelId`] rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelCreationResult {
	#[serde(default)]
	pub channel_id: String,
	#[serde(default)]
	pub sora_url: String,
}

impl ChannelCreationResult {
	pub fn ensure_channel_id(&self) -> Result<&str> {
		if self.channel_id.is_empty() {
			return Err(Error::EmptyChannelId);
		}
		Ok(&self.channel_id)
	}
}

pub struct ImageFluxClient {
	http: Client,
	endpoint: String,
	token: BearerToken,
}

impl ImageFluxClient {
	pub fn new(token: BearerToken) -> Self {
		Self {
			http: Client::new(),
			endpoint: IMAGE_FLUX_API_URL.to_string(),
			token,
		}
	}

	/// Point the client at another base URL (a mock server in tests)
	pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.endpoint = endpoint.into();
		self
	}

	#[instrument(skip_all, fields(renditions = profile.hls.len()))]
	pub async fn create_channel(&self, profile: &StreamingProfile) -> Result<ChannelCreationResult> {
		let response = self
			.http
			.post(&self.endpoint)
			.header(CONTENT_TYPE, "application/json")
			.header("X-Sora-Target", CREATE_CHANNEL_TARGET)
			.bearer_auth(self.token.expose())
			.json(profile)
			.send()
			.await?;

		let status = response.status();
		let body = response.text().await?;
		debug!(%status, "ImageFlux API responded");

		if !status.is_success() {
			return Err(Error::ApiStatus { status, body });
		}

		let channel: ChannelCreationResult = serde_json::from_str(&body).map_err(Error::Decode)?;
		info!(channel_id = %channel.channel_id, sora_url = %channel.sora_url, "CreateChannelResponse");
		Ok(channel)
	}
}
