//! Analytics service entry point.
//!
//! Stateless HTTP service computing engagement rates for profile summaries.

use dotenv::dotenv;
use std::env;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use profile_analytics::server::{create_app, run_server};

/// Default listen address for the analytics service.
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8084";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("profile_analytics=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    init_tracing();

    let addr: SocketAddr = env::var("ANALYTICS_LISTEN_ADDR")
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
        .parse()
        .map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid ANALYTICS_LISTEN_ADDR: {}", e),
            )
        })?;

    info!(
        service_name = "profile-analytics",
        service_version = env!("CARGO_PKG_VERSION"),
        "Starting analytics service"
    );

    run_server(create_app(), addr).await
}
