//! Application layer for debate-coach
//!
//! This crate contains the backend gateway port and the session controller
//! use case. It depends only on the domain layer; the HTTP adapter
//! implementing the port lives in the infrastructure layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::backend_gateway::{BackendGateway, ChatReply, GatewayError};
pub use use_cases::controller::{CoachController, SendOutcome};
