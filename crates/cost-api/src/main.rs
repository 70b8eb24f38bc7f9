//! # Order Cost RS
//!
//! Order cost computation service.
//!
//! ## Usage
//!
//! ```bash
//! # Optional overrides (also read from .env)
//! export PORT=8080
//! export RUST_LOG=info,cost_api=debug
//! export LOG_FORMAT=json
//!
//! # Run the server
//! order-cost
//! ```

use cost_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize logging
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(json_logs.then(|| fmt::layer().json()))
        .with((!json_logs).then(fmt::layer))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::from_env()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Max body size: {} bytes", state.config.max_body_bytes);

    // Create router
    let app = routes::create_router(state);

    info!("Order Cost starting on http://{}", addr);

    if !is_prod {
        info!("Health: http://{}/health", addr);
        info!("Cost: POST http://{}/api/v1/cost", addr);
        info!("Invoke: POST http://{}/invoke", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  Order Cost RS
  ━━━━━━━━━━━━━━━━━━━━━━━
  Deterministic order pricing
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
