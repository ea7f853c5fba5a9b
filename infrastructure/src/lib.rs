//! Infrastructure layer for debate-coach
//!
//! This crate contains the adapters behind the application-layer ports: the
//! HTTP backend gateway with its endpoint-candidate resolver, and
//! configuration file loading.

pub mod backend;
pub mod config;

// Re-export commonly used types
pub use backend::{
    error::{Attempt, AttemptOutcome, BackendError},
    gateway::HttpCoachGateway,
    resolver::EndpointResolver,
};
pub use config::{ConfigLoader, FileBackendConfig, FileChatConfig, FileConfig};
