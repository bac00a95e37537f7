use crate::imageflux::ChannelCreationResult;
use obs_websocket::StreamServiceSettings;

/// OBS stream service type for a custom WHIP endpoint
pub const WHIP_SERVICE_TYPE: &str = "whip_custom";

/// Bare host of `url`: strips a leading `wss://` or `https://`, then cuts at
/// the first `/`. Never fails; input without a scheme is only truncated.
pub fn extract_host(url: &str) -> &str {
	let rest = url.strip_prefix("wss://").or_else(|| url.strip_prefix("https://")).unwrap_or(url);

	rest.find('/').map_or(rest, |end| &rest[..end])
}

/// Where OBS should push media for a provisioned channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestTarget {
	pub host: String,
	pub channel_id: String,
}

impl IngestTarget {
	pub fn from_channel(channel: &ChannelCreationResult) -> Self {
		Self {
			host: extract_host(&channel.sora_url).to_string(),
			channel_id: channel.channel_id.clone(),
		}
	}

	pub fn server_url(&self) -> String {
		format!("https://{}/whip/{}", self.host, self.channel_id)
	}

	pub fn stream_service_settings(&self) -> StreamServiceSettings {
		StreamServiceSettings::with_server(self.server_url())
	}
}
