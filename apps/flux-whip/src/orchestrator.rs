use crate::config::Config;
use crate::control::ControlPlane;
use crate::error::{Error, Result};
use crate::imageflux::{ChannelCreationResult, ImageFluxClient};
use crate::ingest::{IngestTarget, WHIP_SERVICE_TYPE};
use crate::profile::StreamingProfile;
use obs_websocket::{VersionInfo, LIBRARY_VERSION, RPC_VERSION};
use std::fmt;
use tracing::{error, info, instrument, warn};

/// Progress of a run. Transitions only move forward; `Done` and `Failed`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
	Init,
	Connected,
	ChannelCreated,
	HostExtracted,
	SettingsApplied,
	StreamStarted,
	Done,
	Failed,
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Init => "init",
			Self::Connected => "connected",
			Self::ChannelCreated => "channel-created",
			Self::HostExtracted => "host-extracted",
			Self::SettingsApplied => "settings-applied",
			Self::StreamStarted => "stream-started",
			Self::Done => "done",
			Self::Failed => "failed",
		};
		f.write_str(name)
	}
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
	pub channel: ChannelCreationResult,
	pub whip_server: String,
	pub version: VersionInfo,
}

impl fmt::Display for RunSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Channel ID: {}", self.channel.channel_id)?;
		writeln!(f, "Sora URL: {}", self.channel.sora_url)?;
		writeln!(f, "WHIP server: {}", self.whip_server)?;
		writeln!(f, "OBS Studio version: {}", self.version.obs_version)?;
		writeln!(f, "Server protocol version: {}", self.version.obs_web_socket_version)?;
		writeln!(f, "Client protocol version: {RPC_VERSION}")?;
		write!(f, "Client library version: {LIBRARY_VERSION}")
	}
}

/// Provisions a channel and starts OBS streaming into it.
pub struct Orchestrator<'a, C: ControlPlane> {
	control: &'a mut C,
	provisioner: &'a ImageFluxClient,
	stage: Stage,
	failed_at: Option<Stage>,
}

impl<'a, C: ControlPlane> Orchestrator<'a, C> {
	pub fn new(control: &'a mut C, provisioner: &'a ImageFluxClient) -> Self {
		Self {
			control,
			provisioner,
			stage: Stage::Init,
			failed_at: None,
		}
	}

	pub fn stage(&self) -> Stage {
		self.stage
	}

	/// Last stage reached before the most recent run failed
	pub fn failed_at(&self) -> Option<Stage> {
		self.failed_at
	}

	/// Run every step once, in order. The control session is released on
	/// every path once it has been opened; the remote channel is never
	/// rolled back. Each call starts over from `Init`.
	#[instrument(skip_all)]
	pub async fn run(&mut self, profile: &StreamingProfile) -> Result<RunSummary> {
		self.stage = Stage::Init;
		self.failed_at = None;

		if let Err(e) = self.control.connect().await {
			let e = Error::Connection(e);
			self.fail(&e);
			return Err(e);
		}
		self.advance(Stage::Connected);

		let result = self.provision_and_stream(profile).await;

		if let Err(e) = self.control.disconnect().await {
			warn!("Error disconnecting from OBS: {}", e);
		}

		match &result {
			Ok(_) => self.advance(Stage::Done),
			Err(e) => self.fail(e),
		}
		result
	}

	async fn provision_and_stream(&mut self, profile: &StreamingProfile) -> Result<RunSummary> {
		let channel = self.provisioner.create_channel(profile).await?;
		channel.ensure_channel_id()?;
		self.advance(Stage::ChannelCreated);

		let target = IngestTarget::from_channel(&channel);
		self.advance(Stage::HostExtracted);

		let version = self.control.get_version().await.map_err(Error::rpc("GetVersion"))?;

		let whip_server = target.server_url();
		info!(server = %whip_server, "Applying WHIP stream service settings");
		self.control
			.set_stream_service_settings(WHIP_SERVICE_TYPE.to_string(), target.stream_service_settings())
			.await
			.map_err(Error::rpc("SetStreamServiceSettings"))?;
		self.advance(Stage::SettingsApplied);

		self.control.start_stream().await.map_err(Error::rpc("StartStream"))?;
		self.advance(Stage::StreamStarted);

		Ok(RunSummary { channel, whip_server, version })
	}

	fn advance(&mut self, next: Stage) {
		debug_assert!(next > self.stage, "stage moved backwards: {} -> {}", self.stage, next);
		info!(from = %self.stage, to = %next, "Stage transition");
		self.stage = next;
	}

	fn fail(&mut self, e: &Error) {
		error!(stage = %self.stage, "Run aborted: {}", e);
		self.failed_at = Some(self.stage);
		self.stage = Stage::Failed;
	}
}

/// Load configuration through `lookup`, then provision and stream.
///
/// Configuration and the streaming profile are validated before `control`
/// is built, so a bad environment never reaches OBS or ImageFlux.
/// `endpoint` replaces the ImageFlux API URL when set.
pub async fn run<F, C, M>(lookup: F, endpoint: Option<&str>, control: M) -> Result<RunSummary>
where
	F: Fn(&str) -> Option<String>,
	C: ControlPlane,
	M: FnOnce(&Config) -> C,
{
	let config = Config::from_lookup(lookup)?;
	let profile = config.streaming_profile()?;
	info!("📋 Configuration loaded - OBS: {}, renditions: {}", config.obs.url(), profile.hls.len());

	let mut provisioner = ImageFluxClient::new(config.auth_key.clone());
	if let Some(endpoint) = endpoint {
		provisioner = provisioner.with_endpoint(endpoint);
	}
	let mut control = control(&config);

	Orchestrator::new(&mut control, &provisioner).run(&profile).await
}
