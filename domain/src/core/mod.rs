//! Core domain types

pub mod error;

pub use error::DomainError;
