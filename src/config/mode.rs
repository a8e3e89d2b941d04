//! Deployment Mode
//!
//! Maps the `NODE_ENV` indicator to the env file loaded at startup:
//!
//! | Indicator                     | File              |
//! |-------------------------------|-------------------|
//! | `production`                  | `.env.production` |
//! | `staging`                     | `.env.staging`    |
//! | `test`                        | `.env.test`       |
//! | `development`, absent, other  | `.env`            |

use std::path::{Path, PathBuf};

use super::env::EnvSnapshot;

/// Variable holding the mode indicator
pub const MODE_VAR: &str = "NODE_ENV";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    Production,
    Staging,
    Test,
    #[default]
    Development,
}

impl Mode {
    /// Lenient lookup: absent or unrecognized indicators select development.
    pub fn from_indicator(indicator: Option<&str>) -> Self {
        match indicator {
            Some("production") => Mode::Production,
            Some("staging") => Mode::Staging,
            Some("test") => Mode::Test,
            _ => Mode::Development,
        }
    }

    pub fn from_env(env: &EnvSnapshot) -> Self {
        Self::from_indicator(env.get(MODE_VAR))
    }

    pub fn env_file_name(self) -> &'static str {
        match self {
            Mode::Production => ".env.production",
            Mode::Staging => ".env.staging",
            Mode::Test => ".env.test",
            Mode::Development => ".env",
        }
    }

    /// Env file location relative to `root` (normally the working directory)
    pub fn env_file_path(self, root: &Path) -> PathBuf {
        root.join(self.env_file_name())
    }

    pub fn is_production(self) -> bool {
        self == Mode::Production
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Production => write!(f, "production"),
            Mode::Staging => write!(f, "staging"),
            Mode::Test => write!(f, "test"),
            Mode::Development => write!(f, "development"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Mode::Production),
            "staging" => Ok(Mode::Staging),
            "test" => Ok(Mode::Test),
            "development" => Ok(Mode::Development),
            _ => Err(format!(
                "Unknown mode: {}. Valid values: production, staging, test, development",
                s
            )),
        }
    }
}
