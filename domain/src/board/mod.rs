//! Argument board entities

pub mod entities;

pub use entities::{Board, BoardItem, Category};
