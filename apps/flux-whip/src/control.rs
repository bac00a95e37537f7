use async_trait::async_trait;
use obs_websocket::{ObsClient, ObsWebsocketError, StreamServiceSettings, VersionInfo};

/// The operations the run needs from the streaming application
#[async_trait]
pub trait ControlPlane: Send {
	async fn connect(&mut self) -> Result<(), ObsWebsocketError>;

	/// Release the session; called once on every path after `connect` succeeds
	async fn disconnect(&mut self) -> Result<(), ObsWebsocketError>;

	async fn get_version(&mut self) -> Result<VersionInfo, ObsWebsocketError>;

	async fn set_stream_service_settings(&mut self, service_type: String, settings: StreamServiceSettings) -> Result<(), ObsWebsocketError>;

	async fn start_stream(&mut self) -> Result<(), ObsWebsocketError>;
}

#[async_trait]
impl ControlPlane for ObsClient {
	async fn connect(&mut self) -> Result<(), ObsWebsocketError> {
		Self::connect(self).await
	}

	async fn disconnect(&mut self) -> Result<(), ObsWebsocketError> {
		Self::disconnect(self).await
	}

	async fn get_version(&mut self) -> Result<VersionInfo, ObsWebsocketError> {
		Self::get_version(self).await
	}

	async fn set_stream_service_settings(&mut self, service_type: String, settings: StreamServiceSettings) -> Result<(), ObsWebsocketError> {
		Self::set_stream_service_settings(self, &service_type, &settings).await
	}

	async fn start_stream(&mut self) -> Result<(), ObsWebsocketError> {
		Self::start_stream(self).await
	}
}
