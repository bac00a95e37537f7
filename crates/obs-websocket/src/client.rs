use crate::auth::{authenticate, SessionInfo};
use crate::types::{Frame, ObsRequest, ObsRequestType, OpCode, RequestData, RequestResponse, SetStreamServiceSettingsParams, StreamServiceSettings, VersionInfo};
use crate::{ObsConfig, ObsWebsocketError};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message as TungsteniteMessage, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, instrument, trace, warn};
use uuid::Uuid;

pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

type Result<T> = std::result::Result<T, ObsWebsocketError>;

/// Reads frames until a text frame arrives. Pings are answered by tungstenite
/// on the next read or write.
pub(crate) async fn next_text(stream: &mut WsStream) -> Result<String> {
	while let Some(msg) = stream.next().await {
		match msg? {
			TungsteniteMessage::Text(text) => return Ok(text.to_string()),
			TungsteniteMessage::Close(frame) => {
				let (code, reason) = frame.map_or((1005, String::new()), |f| (u16::from(f.code), f.reason.to_string()));
				return Err(ObsWebsocketError::Closed { code, reason });
			}
			_ => {}
		}
	}

	Err(ObsWebsocketError::Closed {
		code: 1006,
		reason: "stream ended".to_string(),
	})
}

/// Sequential request/response client for a single OBS session.
///
/// Each request is written, then frames are read until the response with the
/// matching `requestId` arrives. Anything else on the socket is skipped.
pub struct ObsClient {
	config: ObsConfig,
	socket: Option<WsStream>,
	session: Option<SessionInfo>,
}

impl ObsClient {
	pub fn new(config: ObsConfig) -> Self {
		Self {
			config,
			socket: None,
			session: None,
		}
	}

	pub fn is_connected(&self) -> bool {
		self.socket.is_some()
	}

	/// Session details negotiated during the handshake
	pub fn session(&self) -> Option<&SessionInfo> {
		self.session.as_ref()
	}

	/// Open the socket and identify. A no-op when already connected.
	#[instrument(skip(self), fields(host = %self.config.host, port = self.config.port))]
	pub async fn connect(&mut self) -> Result<()> {
		if self.socket.is_some() {
			return Ok(());
		}

		let url = self.config.url();
		let (mut socket, _) = connect_async(&url).await?;
		debug!("WebSocket connected to {}", url);

		let session = authenticate(&self.config.password, &mut socket).await?;

		self.socket = Some(socket);
		self.session = Some(session);
		info!("Connected to OBS WebSocket");
		Ok(())
	}

	/// Close the session. Safe to call more than once.
	pub async fn disconnect(&mut self) -> Result<()> {
		self.session = None;
		let Some(mut socket) = self.socket.take() else {
			return Ok(());
		};

		match socket.close(None).await {
			Ok(()) => {}
			Err(tokio_tungstenite::tungstenite::Error::ConnectionClosed | tokio_tungstenite::tungstenite::Error::AlreadyClosed) => {}
			Err(e) => {
				warn!("Error closing OBS WebSocket: {}", e);
				return Err(e.into());
			}
		}

		info!("Disconnected from OBS WebSocket");
		Ok(())
	}

	pub async fn get_version(&mut self) -> Result<VersionInfo> {
		let data = self
			.request(ObsRequestType::GetVersion, None::<()>)
			.await?
			.ok_or_else(|| ObsWebsocketError::Protocol("GetVersion response carried no data".to_string()))?;

		Ok(serde_json::from_value(data)?)
	}

	pub async fn set_stream_service_settings(&mut self, service_type: &str, settings: &StreamServiceSettings) -> Result<()> {
		let params = SetStreamServiceSettingsParams {
			stream_service_type: service_type,
			stream_service_settings: settings,
		};
		self.request(ObsRequestType::SetStreamServiceSettings, Some(params)).await?;
		Ok(())
	}

	pub async fn start_stream(&mut self) -> Result<()> {
		self.request(ObsRequestType::StartStream, None::<()>).await?;
		Ok(())
	}

	#[instrument(skip(self, params))]
	async fn request<T>(&mut self, request_type: ObsRequestType, params: Option<T>) -> Result<Option<Value>>
	where
		T: Serialize,
	{
		let socket = self.socket.as_mut().ok_or(ObsWebsocketError::NotConnected)?;
		let request_id = format!("req-{}", Uuid::new_v4().simple());

		let request = ObsRequest {
			op_code: OpCode::Request.code(),
			d: RequestData {
				t: request_type,
				id: request_id.clone(),
				p: params,
			},
		};
		socket.send(TungsteniteMessage::Text(serde_json::to_string(&request)?.into())).await?;
		trace!("Sent {} ({})", request_type, request_id);

		loop {
			let text = next_text(socket).await?;
			let frame: Frame = serde_json::from_str(&text)?;

			if frame.op != OpCode::RequestResponse.code() {
				trace!("Skipping frame with op {}", frame.op);
				continue;
			}

			let response: RequestResponse = serde_json::from_value(frame.d)?;
			if response.request_id != request_id {
				trace!("Skipping response for {}", response.request_id);
				continue;
			}

			if !response.request_status.result {
				return Err(ObsWebsocketError::RequestFailed {
					request_type,
					code: response.request_status.code,
					comment: response.request_status.comment.unwrap_or_default(),
				});
			}

			debug!("{} succeeded", request_type);
			return Ok(response.response_data);
		}
	}
}
