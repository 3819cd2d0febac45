//! Contact Service
//!
//! Validates contact form submissions and forwards them through a chain of
//! third-party email relays.
//!
//! - `message`: Request/validated message types and validation
//! - `relay`: EmailJS and Formspree relays
//! - `service`: Fallback chain

pub mod message;
pub mod relay;
pub mod service;

pub use message::{ContactError, ContactMessage, ContactRequest, DEFAULT_SUBJECT};
pub use relay::{EmailJsRelay, FormspreeRelay, Relay, RelayError};
pub use service::{ContactService, Delivery};
