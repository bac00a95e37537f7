pub mod config;
pub mod control;
pub mod error;
pub mod imageflux;
pub mod ingest;
pub mod orchestrator;
pub mod profile;

pub use config::Config;
pub use control::ControlPlane;
pub use error::{Error, Result};
pub use imageflux::{ChannelCreationResult, ImageFluxClient};
pub use ingest::{extract_host, IngestTarget};
pub use orchestrator::{run, Orchestrator, RunSummary, Stage};
pub use profile::StreamingProfile;
