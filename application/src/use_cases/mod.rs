//! Use cases

pub mod controller;

pub use controller::{CoachController, SendOutcome};
