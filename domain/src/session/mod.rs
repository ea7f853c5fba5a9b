//! Session entities and the conversational mode value object

pub mod entities;
pub mod mode;

pub use entities::{Session, SessionId, SessionPhase};
pub use mode::Mode;
