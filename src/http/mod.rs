//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, body parsing)
//!     → handlers.rs (factcheck / check-news / health)
//!     → error.rs (failures mapped to status + JSON body)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::AppError;
pub use request::{SubmissionBody, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
