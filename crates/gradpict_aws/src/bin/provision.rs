use std::process::ExitCode;

use gradpict_aws::sdk::load_sdk_config;
use gradpict_aws::Provisioner;
use gradpict_core::config::Settings;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let settings = Settings::from_env();
    let sdk_config = load_sdk_config().await;
    let provisioner = Provisioner::from_settings(&sdk_config, settings);

    match provisioner.setup().await {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error during AWS setup: {error}");
            ExitCode::FAILURE
        }
    }
}
