use clap::Parser;

use trackit::cli::{self, Cli};
use trackit::config::Config;
use trackit::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout is reserved for command output
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trackit=info".into());
    if std::env::var("TRACKIT_LOG_JSON").is_ok_and(|v| v == "1") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    let config = Config::from_env();
    tracing::debug!(api_url = %config.api_url, session_file = %config.session_file.display(), "Loaded config");

    let state = AppState::new(config)?;
    cli::run(cli, state).await
}
