//! Configuration Loader
//!
//! Runs once at startup, before the host opens any socket:
//! 1. Capture the process environment
//! 2. Select the env file from `NODE_ENV`
//! 3. Layer the env file underneath the captured values (best effort)
//! 4. Resolve settings and assemble `{ projectConfig, plugins, modules }`

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::env::{EnvFileStatus, EnvSnapshot};
use super::mode::Mode;
use super::settings::ProjectConfig;
use super::types::{ConfigModule, LoadedConfig};
use crate::modules::Modules;
use crate::plugins;
use crate::types::Result;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the process environment and the working directory
    pub fn load() -> Result<LoadedConfig> {
        Self::load_from(&Self::project_root(), EnvSnapshot::capture())
    }

    /// Load with an explicit root directory and environment
    pub fn load_from(root: &Path, env: EnvSnapshot) -> Result<LoadedConfig> {
        let mode = Mode::from_env(&env);
        Self::load_with_mode(root, env, mode)
    }

    /// Load with the mode fixed by the caller instead of `NODE_ENV`
    pub fn load_with_mode(root: &Path, env: EnvSnapshot, mode: Mode) -> Result<LoadedConfig> {
        let path = mode.env_file_path(root);
        debug!("Mode {} selects env file {}", mode, path.display());

        let (env, status) = env.with_env_file(&path);
        if let EnvFileStatus::Unreadable { reason, .. } = &status {
            debug!("Continuing without env file: {}", reason);
        }

        let module = Self::assemble(&env)?;
        for warning in Self::startup_warnings(mode, &module.project_config) {
            warn!("{}", warning);
        }
        info!(
            "Assembled configuration: mode={}, plugins={}",
            mode,
            module.plugins.len()
        );

        Ok(LoadedConfig {
            mode,
            env_file: status,
            module,
        })
    }

    /// Assemble the export from an environment without touching the filesystem
    pub fn assemble(env: &EnvSnapshot) -> Result<ConfigModule> {
        let project_config = ProjectConfig::resolve(env)?;
        let modules = Modules::redis(&project_config.redis_url);

        Ok(ConfigModule {
            project_config,
            plugins: plugins::assemble(env),
            modules,
        })
    }

    /// Warnings logged after a load. Only production flags development secrets.
    pub fn startup_warnings(mode: Mode, project_config: &ProjectConfig) -> Vec<String> {
        if !mode.is_production() {
            return Vec::new();
        }
        project_config
            .insecure_defaults()
            .into_iter()
            .map(|secret| {
                format!(
                    "{} is unset in production; using the development default",
                    secret
                )
            })
            .collect()
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Directory env files are resolved against
    pub fn project_root() -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Env file for `mode` under `root`
    pub fn env_file_path(root: &Path, mode: Mode) -> PathBuf {
        mode.env_file_path(root)
    }
}
