use flux_whip::config::BearerToken;
use flux_whip::{Error, ImageFluxClient, StreamingProfile};
use serde_json::json;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn create_channel_decodes_response() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(header("Authorization", "Bearer secret"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"channel_id": "abc123",
			"sora_url": "https://live-sora002.imageflux.jp/path",
			"playback_url": "https://example.com/hls/abc123/index.m3u8"
		})))
		.expect(1)
		.mount(&server)
		.await;

	let client = ImageFluxClient::new(BearerToken::new("secret")).with_endpoint(server.uri());
	let channel = client.create_channel(&StreamingProfile::default()).await.unwrap();

	assert_eq!(channel.channel_id, "abc123");
	assert_eq!(channel.sora_url, "https://live-sora002.imageflux.jp/path");
}

#[tokio::test]
async fn server_error_is_reported_with_body() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(500).set_body_string("internal"))
		.mount(&server)
		.await;

	let client = ImageFluxClient::new(BearerToken::new("secret")).with_endpoint(server.uri());
	let err = client.create_channel(&StreamingProfile::default()).await.unwrap_err();

	assert!(err.to_string().contains("internal"), "unexpected message: {err}");
	assert!(matches!(err, Error::ApiStatus { .. }));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
	let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
	let port = listener.local_addr().unwrap().port();
	drop(listener);

	let client = ImageFluxClient::new(BearerToken::new("secret")).with_endpoint(format!("http://127.0.0.1:{port}/"));
	let err = client.create_channel(&StreamingProfile::default()).await.unwrap_err();

	assert!(matches!(err, Error::Network(_)));
	assert_eq!(err.exit_code(), 1);
}
