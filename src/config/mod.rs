//! Configuration Management
//!
//! Startup configuration with a fixed resolution chain:
//! 1. Built-in defaults
//! 2. Mode-specific env file (`.env`, `.env.test`, `.env.staging`, `.env.production`)
//! 3. Process environment variables (highest priority)
//!
//! The result is an immutable [`ConfigModule`] snapshot handed to the host.

mod env;
mod loader;
mod mode;
mod settings;
mod types;

pub use env::{EnvFileStatus, EnvSnapshot};
pub use loader::ConfigLoader;
pub use mode::{MODE_VAR, Mode};
pub use settings::{DEV_SECRET, ProjectConfig, SETTING_VARS};
pub use types::*;
