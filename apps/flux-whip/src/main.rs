use flux_whip::config::env_var;
use obs_websocket::ObsClient;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	dotenv::dotenv().ok();

	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "flux_whip=info,obs_websocket=info".into()))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	match flux_whip::run(env_var, None, |config| ObsClient::new(config.obs.clone())).await {
		Ok(summary) => {
			println!("{summary}");
			ExitCode::SUCCESS
		}
		Err(e) => {
			eprintln!("❌ {e}");
			ExitCode::from(e.exit_code())
		}
	}
}

