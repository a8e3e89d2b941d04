//! Infrastructure Module Overrides
//!
//! Redirects the host's event bus and cache service to Redis-backed
//! implementations sharing the resolved `redis_url`.

use serde::{Deserialize, Serialize};

pub const EVENT_BUS_REDIS: &str = "@medusajs/event-bus-redis";
pub const CACHE_REDIS: &str = "@medusajs/cache-redis";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Modules {
    pub event_bus: ModuleOverride,
    pub cache_service: ModuleOverride,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleOverride {
    pub resolve: String,
    pub options: RedisModuleOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RedisModuleOptions {
    pub redis_url: String,
}

impl ModuleOverride {
    pub fn redis(resolve: &str, redis_url: &str) -> Self {
        Self {
            resolve: resolve.to_string(),
            options: RedisModuleOptions {
                redis_url: redis_url.to_string(),
            },
        }
    }
}

impl Modules {
    pub fn redis(redis_url: &str) -> Self {
        Self {
            event_bus: ModuleOverride::redis(EVENT_BUS_REDIS, redis_url),
            cache_service: ModuleOverride::redis(CACHE_REDIS, redis_url),
        }
    }

    /// `(key, override)` pairs in export order
    pub fn entries(&self) -> [(&'static str, &ModuleOverride); 2] {
        [
            ("eventBus", &self.event_bus),
            ("cacheService", &self.cache_service),
        ]
    }
}
