use crate::client::{next_text, WsStream};
use crate::types::{Frame, Hello, Identified, Identify, OpCode};
use crate::{ObsWebsocketError, RPC_VERSION};
use base64::engine::{general_purpose::STANDARD as BASE64_STANDARD, Engine};
use futures_util::sink::SinkExt;
use sha2::{Digest, Sha256};
use tokio_tungstenite::tungstenite::protocol::Message as TungsteniteMessage;
use tracing::{debug, info, warn};

/// Requests only; no event categories are subscribed.
const EVENT_SUBSCRIPTIONS: u32 = 0;

/// Negotiated session details returned by a successful handshake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
	pub obs_web_socket_version: String,
	pub rpc_version: u32,
}

/// `base64(sha256(base64(sha256(password + salt)) + challenge))`
pub(crate) fn auth_string(password: &str, salt: &str, challenge: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(password.as_bytes());
	hasher.update(salt.as_bytes());
	let secret = BASE64_STANDARD.encode(hasher.finalize());

	let mut second_hasher = Sha256::new();
	second_hasher.update(secret.as_bytes());
	second_hasher.update(challenge.as_bytes());
	BASE64_STANDARD.encode(second_hasher.finalize())
}

/// Runs the Hello / Identify / Identified exchange on a fresh socket.
pub(crate) async fn authenticate(password: &str, stream: &mut WsStream) -> Result<SessionInfo, ObsWebsocketError> {
	let hello = wait_for_hello(stream).await?;

	let authentication = match &hello.authentication {
		Some(auth) => Some(auth_string(password, &auth.salt, &auth.challenge)),
		None => {
			warn!("No authentication required");
			None
		}
	};

	let data = Identify {
		rpc_version: RPC_VERSION,
		authentication,
		event_subscriptions: EVENT_SUBSCRIPTIONS,
	};
	let identify = serde_json::json!({ "op": OpCode::Identify.code(), "d": data });
	stream.send(TungsteniteMessage::Text(identify.to_string().into())).await?;

	let identified = wait_for_identified(stream).await?;
	info!(
		obs_web_socket_version = %hello.obs_web_socket_version,
		rpc_version = identified.negotiated_rpc_version,
		"Successfully identified with OBS WebSocket"
	);

	Ok(SessionInfo {
		obs_web_socket_version: hello.obs_web_socket_version,
		rpc_version: identified.negotiated_rpc_version,
	})
}

async fn wait_for_hello(stream: &mut WsStream) -> Result<Hello, ObsWebsocketError> {
	loop {
		let text = next_text(stream).await.map_err(handshake_error)?;
		let frame: Frame = serde_json::from_str(&text)?;

		if frame.op == OpCode::Hello.code() {
			let hello: Hello = serde_json::from_value(frame.d)?;
			debug!(rpc_version = hello.rpc_version, auth = hello.authentication.is_some(), "Hello received");
			return Ok(hello);
		}
	}
}

async fn wait_for_identified(stream: &mut WsStream) -> Result<Identified, ObsWebsocketError> {
	let text = next_text(stream).await.map_err(handshake_error)?;
	let frame: Frame = serde_json::from_str(&text)?;

	if frame.op != OpCode::Identified.code() {
		return Err(ObsWebsocketError::Authentication(format!("expected Identified, got op {}", frame.op)));
	}

	Ok(serde_json::from_value(frame.d)?)
}

// OBS answers a bad Identify by closing the socket (4009 on a wrong password).
fn handshake_error(error: ObsWebsocketError) -> ObsWebsocketError {
	match error {
		ObsWebsocketError::Closed { code, reason } => ObsWebsocketError::Authentication(format!("connection closed during identification ({code}): {reason}")),
		other => other,
	}
}
