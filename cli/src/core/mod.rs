//! Core application infrastructure

pub mod cli;
pub mod config;
pub mod constants;

pub use crate::app::FormbaseApp;
pub use cli::{CliConfig, Commands};
pub use config::{ApiConfig, AppConfig};
