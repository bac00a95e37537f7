use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// OBS WebSocket v5 operation codes used by this client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpCode {
	Hello = 0,
	Identify = 1,
	Identified = 2,
	Request = 6,
	RequestResponse = 7,
}

impl OpCode {
	pub(crate) const fn code(self) -> u8 {
		self as u8
	}
}

/// Requests the client knows how to send to OBS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObsRequestType {
	GetVersion,
	SetStreamServiceSettings,
	StartStream,
}

impl ObsRequestType {
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::GetVersion => "GetVersion",
			Self::SetStreamServiceSettings => "SetStreamServiceSettings",
			Self::StartStream => "StartStream",
		}
	}
}

impl fmt::Display for ObsRequestType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Envelope shared by every frame OBS sends
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Frame {
	pub op: u8,
	#[serde(default)]
	pub d: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Hello {
	pub obs_web_socket_version: String,
	pub rpc_version: u32,
	#[serde(default)]
	pub authentication: Option<AuthChallenge>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthChallenge {
	pub challenge: String,
	pub salt: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Identify {
	pub rpc_version: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub authentication: Option<String>,
	pub event_subscriptions: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Identified {
	pub negotiated_rpc_version: u32,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ObsRequest<T>
where
	T: Serialize,
{
	#[serde(rename = "op")]
	pub op_code: u8,
	pub d: RequestData<T>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RequestData<T>
where
	T: Serialize,
{
	#[serde(rename = "requestType")]
	pub t: ObsRequestType,
	#[serde(rename = "requestId")]
	pub id: String,
	#[serde(rename = "requestData")]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub p: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestResponse {
	pub request_id: String,
	pub request_status: RequestStatus,
	#[serde(default)]
	pub response_data: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RequestStatus {
	pub result: bool,
	pub code: u16,
	#[serde(default)]
	pub comment: Option<String>,
}

/// Response data of `GetVersion`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
	pub obs_version: String,
	pub obs_web_socket_version: String,
	pub rpc_version: u32,
	#[serde(default)]
	pub platform: String,
	#[serde(default)]
	pub platform_description: String,
	#[serde(default)]
	pub available_requests: Vec<String>,
	#[serde(default)]
	pub supported_image_formats: Vec<String>,
}

/// Settings object of a stream service. For `whip_custom` OBS reads
/// `server` and `bearer_token`; `rtmp_custom` uses `server` and `key`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamServiceSettings {
	pub server: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub key: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub bearer_token: Option<String>,
}

impl StreamServiceSettings {
	pub fn with_server(server: impl Into<String>) -> Self {
		Self {
			server: server.into(),
			..Self::default()
		}
	}
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SetStreamServiceSettingsParams<'a> {
	pub stream_service_type: &'a str,
	pub stream_service_settings: &'a StreamServiceSettings,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn request_envelope_matches_protocol() {
		let settings = StreamServiceSettings::with_server("https://edge.example.com/whip/abc");
		let request = ObsRequest {
			op_code: OpCode::Request.code(),
			d: RequestData {
				t: ObsRequestType::SetStreamServiceSettings,
				id: "req-1".to_string(),
				p: Some(SetStreamServiceSettingsParams {
					stream_service_type: "whip_custom",
					stream_service_settings: &settings,
				}),
			},
		};

		let value = serde_json::to_value(&request).unwrap();
		assert_eq!(
			value,
			json!({
				"op": 6,
				"d": {
					"requestType": "SetStreamServiceSettings",
					"requestId": "req-1",
					"requestData": {
						"streamServiceType": "whip_custom",
						"streamServiceSettings": { "server": "https://edge.example.com/whip/abc" }
					}
				}
			})
		);
	}

	#[test]
	fn request_without_params_omits_request_data() {
		let request = ObsRequest {
			op_code: OpCode::Request.code(),
			d: RequestData {
				t: ObsRequestType::StartStream,
				id: "req-2".to_string(),
				p: None::<()>,
			},
		};

		let value = serde_json::to_value(&request).unwrap();
		assert!(value["d"].get("requestData").is_none());
		assert_eq!(value["d"]["requestType"], "StartStream");
	}

	#[test]
	fn hello_without_authentication() {
		let hello: Hello = serde_json::from_value(json!({ "obsWebSocketVersion": "5.5.4", "rpcVersion": 1 })).unwrap();
		assert!(hello.authentication.is_none());
		assert_eq!(hello.rpc_version, 1);
	}

	#[test]
	fn failed_response_keeps_comment() {
		let response: RequestResponse = serde_json::from_value(json!({
			"requestType": "StartStream",
			"requestId": "req-3",
			"requestStatus": { "result": false, "code": 500, "comment": "Output already active." }
		}))
		.unwrap();

		assert!(!response.request_status.result);
		assert_eq!(response.request_status.code, 500);
		assert_eq!(response.request_status.comment.as_deref(), Some("Output already active."));
		assert!(response.response_data.is_none());
	}
}
