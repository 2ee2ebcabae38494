//! Tutorial API server
//!
//! Serves the validated tutorial endpoints (items, whois, profile update,
//! upload and users) on the configured bind address.
//!
//! ```sh
//! cargo run --example tutorial_api -- server.yaml
//! ```
//!
//! The configuration file is optional; defaults bind to 127.0.0.1:8000.

use anyhow::Result;
use fieldguard::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::from_yaml_file(&path)?,
        None => ServerConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    println!("🚀 fieldguard tutorial API");
    println!("   listening on http://{}", config.bind_address);
    println!("   seeded users: {}", config.seed_users.len());
    println!();
    println!("📚 Endpoints:");
    println!("   GET  /items/?item-query=foo&size=10");
    println!("   GET  /items/{{item_id}}?q=search");
    println!("   GET  /whois/{{name}}             (me | user)");
    println!("   PUT  /update-profile/{{user_id}}?confirm=true  body {{user_data, importance}}");
    println!("   POST /upload/{{user_id}}?secret_key=...");
    println!("   POST /users/");
    println!("   GET  /users/{{user_id}}");
    println!();

    ServerBuilder::new().with_config(config).serve().await
}
