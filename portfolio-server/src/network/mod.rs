//! Network Layer
//!
//! JSON-over-HTTP API consumed by the portfolio front-end.

pub mod protocol;
pub mod server;

pub use protocol::{ErrorBody, HealthResponse, ProjectList, SendEmailResponse, TerminalRequest};
pub use server::{router, serve, ApiError, AppState, ServerError};
