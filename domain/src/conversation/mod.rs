//! Conversation log entities

pub mod entities;

pub use entities::{Conversation, Role, Turn};
