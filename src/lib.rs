//! DeFake gateway library.
//!
//! Accepts news text over HTTP and relays it to an external classification
//! service, retrying with a fixed delay while the service wakes up.

pub mod classifier;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
