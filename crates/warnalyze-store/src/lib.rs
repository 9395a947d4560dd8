//! warnalyze-store: Configuration and result repositories.
//!
//! Implements the `ResultRepository` trait in memory and on top of a single
//! JSON file, and loads `warnalyze.toml`.

pub mod config;
pub mod json_file;
pub mod memory;
mod state;

pub use config::{load_config_from, ReportSettings, WarnalyzeConfig};
pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;
