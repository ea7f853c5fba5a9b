//! HTTP adapter for the coach backend
//!
//! The backend's exact route and payload shapes are not guaranteed stable,
//! so every logical operation is expressed as an ordered list of
//! [`candidates`] tried by the [`resolver`] until one is accepted. The
//! [`protocol`] module normalizes the duck-typed response shapes once, at
//! ingestion, and [`gateway`] wires it all up behind the application port.

pub mod candidates;
pub mod error;
pub mod gateway;
pub mod protocol;
pub mod resolver;

pub use error::{Attempt, AttemptOutcome, BackendError};
pub use gateway::HttpCoachGateway;
pub use resolver::EndpointResolver;
