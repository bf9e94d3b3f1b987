use crate::{core::TripPlanner, server, services::GeminiClient};
use anyhow::Context;
use clap::{Arg, Command};
use std::{env, sync::Arc, time::Duration};
use tracing::info;

const DEFAULT_BIND: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "5000";

/// CLI entry point for the trip-planner server
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let matches = Command::new("trip-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("HTTP backend that generates travel plans with Gemini")
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("Gemini API key (or set GOOGLE_API_KEY env var)"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Gemini model to use (or set GEMINI_MODEL env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Gemini API base URL (or set GEMINI_BASE_URL env var)"),
        )
        .arg(
            Arg::new("bind")
                .short('b')
                .long("bind")
                .value_name("ADDR")
                .help("Address to listen on (or set BIND_ADDR env var)"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port to listen on (or set PORT env var)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Provider request timeout in seconds")
                .default_value("120"),
        )
        .get_matches();

    let flag_or_env = |flag: &str, var: &str| {
        matches
            .get_one::<String>(flag)
            .cloned()
            .or_else(|| env::var(var).ok())
    };

    let api_key = flag_or_env("api-key", "GOOGLE_API_KEY");
    let bind = flag_or_env("bind", "BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND.to_string());
    let port: u16 = flag_or_env("port", "PORT")
        .unwrap_or_else(|| DEFAULT_PORT.to_string())
        .parse()
        .context("port must be a number between 0 and 65535")?;
    let timeout_seconds: u64 = matches
        .get_one::<String>("timeout")
        .map(String::as_str)
        .unwrap_or("120")
        .parse()
        .context("timeout must be a whole number of seconds")?;

    let mut client = GeminiClient::new().with_timeout(Duration::from_secs(timeout_seconds));
    if let Some(model) = flag_or_env("model", "GEMINI_MODEL") {
        client = client.with_model(model);
    }
    if let Some(base_url) = flag_or_env("base-url", "GEMINI_BASE_URL") {
        client = client.with_base_url(base_url);
    }
    info!("Using model: {}", client.model());

    let planner = TripPlanner::new(api_key, Arc::new(client));
    server::run_serve(Arc::new(planner), &bind, port).await
}
