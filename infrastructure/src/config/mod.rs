//! Configuration file loading

pub mod file_config;
pub mod loader;

pub use file_config::{FileBackendConfig, FileChatConfig, FileConfig};
pub use loader::ConfigLoader;
