//! Domain layer for debate-coach
//!
//! This crate contains the core entities, value objects, and the pure
//! session/conversation state machine. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A session is the unit of conversation with the coach backend. It is
//! replaced, never mutated: switching modes creates a fresh session and
//! discards the previous conversation, board, and score.
//!
//! ## Argument Board
//!
//! Three independently replaceable item columns (PRO, CON, SOURCES)
//! associated with the active session. Every refresh replaces the whole
//! board atomically; a failed refresh degrades to an explicitly empty board.
//!
//! ## State machine
//!
//! All mutation goes through [`CoachState::apply`], one named transition per
//! external event, so ordering guarantees can be tested without any I/O.

pub mod board;
pub mod conversation;
pub mod core;
pub mod score;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use board::{Board, BoardItem, Category};
pub use conversation::{Conversation, Role, Turn};
pub use core::error::DomainError;
pub use score::{Fallacy, Score};
pub use session::{Mode, Session, SessionId, SessionPhase};
pub use state::{CoachState, StateEvent};
