use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Request body of `CreateMultistreamChannelWithHLS`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingProfile {
	pub hls: Vec<RenditionConfig>,
	#[serde(default)]
	pub encrypt_key_uri: String,
	#[serde(default)]
	pub event_webhook_url: String,
}

/// One tier of the HLS ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenditionConfig {
	#[serde(rename = "durationSeconds", alias = "duration-seconds")]
	pub duration_seconds: u32,
	/// Negative values are relative to the live edge
	#[serde(rename = "startTimeOffset", alias = "start-time-offset")]
	pub start_time_offset: i32,
	pub video: VideoConfig,
	pub audio: AudioConfig,
	#[serde(default, skip_serializing_if = "ArchiveConfig::is_unset")]
	pub archive: ArchiveConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoConfig {
	pub width: u32,
	pub height: u32,
	pub fps: u32,
	#[serde(rename = "bps")]
	pub bitrate: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
	#[serde(rename = "bps")]
	pub bitrate: u64,
}

/// Archive target; an empty destination id means no archive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveConfig {
	#[serde(default)]
	pub archive_destination_id: String,
}

impl ArchiveConfig {
	pub fn is_unset(&self) -> bool {
		self.archive_destination_id.is_empty()
	}
}

impl RenditionConfig {
	fn live(width: u32, height: u32, fps: u32, video_bps: u64, audio_bps: u64) -> Self {
		Self {
			duration_seconds: 1,
			start_time_offset: -2,
			video: VideoConfig {
				width,
				height,
				fps,
				bitrate: video_bps,
			},
			audio: AudioConfig { bitrate: audio_bps },
			archive: ArchiveConfig::default(),
		}
	}
}

impl Default for StreamingProfile {
	/// 1080p60, 720p60 and 480p24; the player picks a tier per viewer.
	fn default() -> Self {
		Self {
			hls: vec![
				RenditionConfig::live(1920, 1080, 60, 15_000_000, 320_000),
				RenditionConfig::live(1280, 720, 60, 2_500_000, 128_000),
				RenditionConfig::live(854, 480, 24, 950_000, 96_000),
			],
			encrypt_key_uri: String::new(),
			event_webhook_url: String::new(),
		}
	}
}

impl StreamingProfile {
	/// Load a profile and validate it. `.toml` files are read as TOML
	/// (kebab-case keys are accepted), anything else as JSON.
	pub fn from_file(path: &Path) -> Result<Self> {
		let raw = fs::read_to_string(path).map_err(|source| Error::ProfileRead {
			path: path.to_path_buf(),
			source,
		})?;

		let is_toml = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
		let parsed: std::result::Result<Self, String> = if is_toml {
			toml::from_str(&raw).map_err(|e| e.to_string())
		} else {
			serde_json::from_str(&raw).map_err(|e| e.to_string())
		};
		let profile: Self = parsed.map_err(|reason| Error::ProfileFormat {
			path: path.to_path_buf(),
			reason,
		})?;

		profile.validate()?;
		Ok(profile)
	}

	pub fn validate(&self) -> Result<()> {
		if self.hls.is_empty() {
			return Err(Error::Config("streaming profile has no HLS renditions".to_string()));
		}

		for (index, rendition) in self.hls.iter().enumerate() {
			let checks = [
				("video width", rendition.video.width == 0),
				("video height", rendition.video.height == 0),
				("video fps", rendition.video.fps == 0),
				("video bps", rendition.video.bitrate == 0),
				("audio bps", rendition.audio.bitrate == 0),
				("durationSeconds", rendition.duration_seconds == 0),
			];

			if let Some((field, _)) = checks.iter().find(|(_, is_zero)| *is_zero) {
				return Err(Error::Config(format!("rendition {index}: {field} must be positive")));
			}
		}

		Ok(())
	}
}
