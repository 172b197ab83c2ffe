//! CrewMatch backend server entrypoint.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crewmatch::config::Config;
use crewmatch::db::{self, Repository};
use crewmatch::slack::SlackClient;
use crewmatch::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CrewMatch Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if no Slack token is configured
    if config.slack_token.is_none() {
        tracing::warn!(
            "No Slack token configured (CREWMATCH_SLACK_TOKEN). Slack lookups will report exists=false."
        );
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Initialize the Slack client
    let slack = Arc::new(SlackClient::new(
        &config.slack_api_url,
        config.slack_token.clone(),
    ));

    // Create application state
    let state = AppState {
        repo,
        slack,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
