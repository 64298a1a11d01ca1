//! HTTP layer
//!
//! Axum server with:
//! - CORS (localhost only by default)
//! - Request tracing and timeouts
//! - Graceful shutdown
//! - Envelope responses for every outcome

pub mod envelope;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod state;

pub use envelope::{ApiResponse, ErrorDetail, ErrorKind};
pub use error::ApiError;
pub use server::{build_router, run_server, ServerError};
pub use state::AppState;
