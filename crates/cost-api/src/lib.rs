//! # cost-api
//!
//! HTTP API layer for order-cost-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - A REST endpoint for order cost computation
//! - A gateway-style `/invoke` endpoint that accepts event envelopes
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/cost` | Compute order cost breakdown |
//! | POST | `/invoke` | Compute from an event, reply with a proxy envelope |

pub mod envelope;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
