//! Project Settings (Figment-based)
//!
//! Scalar settings resolved with a fixed precedence:
//! 1. Environment value, when set and non-empty
//! 2. Built-in development default
//!
//! No coercion or validation is applied to the values.

use figment::{Figment, providers::Serialized};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::env::EnvSnapshot;
use crate::types::Result;

/// Development secret used when `JWT_SECRET`/`COOKIE_SECRET` are unset
pub const DEV_SECRET: &str = "supersecret";

/// Environment variables feeding [`ProjectConfig`]
pub const SETTING_VARS: [&str; 6] = [
    "JWT_SECRET",
    "COOKIE_SECRET",
    "STORE_CORS",
    "DATABASE_URL",
    "ADMIN_CORS",
    "REDIS_URL",
];

/// Secrets, CORS allow-lists and connection strings for the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub jwt_secret: String,

    pub cookie_secret: String,

    /// Storefront origins (comma-separated)
    pub store_cors: String,

    pub database_url: String,

    /// Admin dashboard origins (comma-separated)
    pub admin_cors: String,

    /// Backing store for the event bus and cache modules
    pub redis_url: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_SECRET.to_string(),
            cookie_secret: DEV_SECRET.to_string(),
            store_cors: "http://localhost:8000,http://localhost:5173".to_string(),
            database_url: "postgres://localhost/medusa-starter-default".to_string(),
            admin_cors: "http://localhost:7000,http://localhost:7001,http://localhost:9000"
                .to_string(),
            redis_url: "redis://localhost:6379".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Resolve settings from defaults overlaid with non-empty env values.
    pub fn resolve(env: &EnvSnapshot) -> Result<Self> {
        let overrides: BTreeMap<String, String> = SETTING_VARS
            .iter()
            .filter_map(|var| {
                env.non_empty(var)
                    .map(|value| (var.to_lowercase(), value.to_string()))
            })
            .collect();

        let config = Figment::new()
            .merge(Serialized::defaults(ProjectConfig::default()))
            .merge(Serialized::defaults(overrides))
            .extract()?;

        Ok(config)
    }

    pub fn admin_origins(&self) -> Vec<&str> {
        split_origins(&self.admin_cors)
    }

    pub fn store_origins(&self) -> Vec<&str> {
        split_origins(&self.store_cors)
    }

    /// Env variables whose secret still equals the development default
    pub fn insecure_defaults(&self) -> Vec<&'static str> {
        let mut insecure = Vec::new();
        if self.jwt_secret == DEV_SECRET {
            insecure.push("JWT_SECRET");
        }
        if self.cookie_secret == DEV_SECRET {
            insecure.push("COOKIE_SECRET");
        }
        insecure
    }
}

fn split_origins(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .collect()
}
