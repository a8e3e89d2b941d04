//! medusa-config - Typed Startup Configuration for a Medusa Backend
//!
//! Resolves the deployment mode, loads the matching env file and assembles the
//! object the host framework consumes at boot:
//!
//! ```text
//! { projectConfig, plugins, modules }
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use medusa_config::ConfigLoader;
//!
//! let loaded = ConfigLoader::load()?;
//! println!("{}", loaded.module.to_json_pretty()?);
//! # Ok::<(), medusa_config::ConfigError>(())
//! ```
//!
//! ## Modules
//!
//! - [`config`]: mode resolution, env snapshot, project settings and the loader
//! - [`plugins`]: typed plugin descriptors and their options
//! - [`modules`]: Redis-backed infrastructure overrides
//! - [`cli`]: handlers behind the `medusa-config` binary

pub mod cli;
pub mod config;
pub mod modules;
pub mod plugins;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{
    ConfigLoader, ConfigModule, EnvFileStatus, EnvSnapshot, ExportFormat, LoadedConfig, Mode,
    ProjectConfig,
};

// Descriptors
pub use modules::{ModuleOverride, Modules};
pub use plugins::Plugin;

// Error Types
pub use types::error::{ConfigError, Result, ResultExt};
