//! Environment Snapshot
//!
//! An immutable copy of the environment taken once at startup. Values from an
//! env file are layered underneath the captured variables: a key that is
//! already set is never overwritten. The process environment itself is only
//! read, never written.
//!
//! Env file values are taken literally: `$NAME` and `${NAME}` are not expanded.
//! Lines that do not parse are skipped; the remaining pairs still load.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Outcome of the best-effort env file load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFileStatus {
    /// File read; `added` keys were not previously set, `skipped` lines did not parse
    Loaded {
        path: PathBuf,
        added: usize,
        skipped: usize,
    },
    /// No file at the path
    Missing { path: PathBuf },
    /// File exists but could not be read; nothing was applied
    Unreadable { path: PathBuf, reason: String },
}

impl EnvFileStatus {
    pub fn path(&self) -> &Path {
        match self {
            EnvFileStatus::Loaded { path, .. }
            | EnvFileStatus::Missing { path }
            | EnvFileStatus::Unreadable { path, .. } => path,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, EnvFileStatus::Loaded { .. })
    }
}

impl std::fmt::Display for EnvFileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvFileStatus::Loaded {
                path,
                added,
                skipped,
            } => write!(
                f,
                "loaded {} ({} new keys, {} skipped lines)",
                path.display(),
                added,
                skipped
            ),
            EnvFileStatus::Missing { path } => write!(f, "missing {}", path.display()),
            EnvFileStatus::Unreadable { path, reason } => {
                write!(f, "unreadable {}: {}", path.display(), reason)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Copy the current process environment. Entries that are not valid
    /// UTF-8 are skipped.
    pub fn capture() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Layer a dotenv file underneath the current values.
    ///
    /// Never fails: a missing or unreadable file leaves the snapshot as is and
    /// is reported through the returned status.
    pub fn with_env_file(self, path: &Path) -> (Self, EnvFileStatus) {
        let path_buf = path.to_path_buf();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No env file at {}", path.display());
                return (self, EnvFileStatus::Missing { path: path_buf });
            }
            Err(e) => {
                warn!("Ignoring env file {}: {}", path.display(), e);
                let reason = e.to_string();
                return (
                    self,
                    EnvFileStatus::Unreadable {
                        path: path_buf,
                        reason,
                    },
                );
            }
        };

        let mut vars = self.vars;
        let mut added = 0;
        let mut skipped = 0;

        for (number, line) in content.lines().enumerate() {
            let literal = escape_substitutions(line);
            for entry in dotenvy::from_read_iter(literal.as_bytes()) {
                match entry {
                    Ok((key, value)) => {
                        if !vars.contains_key(&key) {
                            vars.insert(key, value);
                            added += 1;
                        }
                    }
                    Err(e) => {
                        warn!(
                            "Skipping line {} of {}: {}",
                            number + 1,
                            path.display(),
                            e
                        );
                        skipped += 1;
                    }
                }
            }
        }

        debug!("Loaded {} new keys from {}", added, path.display());
        (
            Self { vars },
            EnvFileStatus::Loaded {
                path: path_buf,
                added,
                skipped,
            },
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Value of `key` when set to a non-empty string
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Owned copy of `key` when set, for optional plugin fields
    pub fn optional(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }
}

/// Escape every `$` the dotenv parser would expand. Single-quoted spans are
/// already literal and pass through untouched.
fn escape_substitutions(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut single = false;
    let mut double = false;
    let mut escaped = false;

    for c in line.chars() {
        if escaped {
            escaped = false;
            out.push(c);
            continue;
        }
        match c {
            '\'' if !double => single = !single,
            '"' if !single => double = !double,
            '\\' if !single => escaped = true,
            '$' if !single => out.push('\\'),
            _ => {}
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_env_file_fills_missing_keys_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "# local overrides\nDATABASE_URL=postgres://db/shop\nJWT_SECRET=\"from-file\"\n",
        )
        .unwrap();

        let env = EnvSnapshot::from_pairs([("JWT_SECRET", "from-process")]);
        let (env, status) = env.with_env_file(&path);

        assert_eq!(env.get("DATABASE_URL"), Some("postgres://db/shop"));
        assert_eq!(env.get("JWT_SECRET"), Some("from-process"));
        assert_eq!(
            status,
            EnvFileStatus::Loaded {
                path: path.clone(),
                added: 1,
                skipped: 0
            }
        );
        assert!(status.is_loaded());
    }

    #[test]
    fn test_missing_env_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env.production");

        let before = EnvSnapshot::from_pairs([("REDIS_URL", "redis://cache:6379")]);
        let (after, status) = before.clone().with_env_file(&path);

        assert_eq!(before, after);
        assert_eq!(status, EnvFileStatus::Missing { path });
        assert!(!status.is_loaded());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "DATABASE_URL=postgres://prod/shop\nthis is not a pair\nJWT_SECRET=s3cr3t\n",
        )
        .unwrap();

        let (env, status) = EnvSnapshot::default().with_env_file(&path);

        assert_eq!(env.get("DATABASE_URL"), Some("postgres://prod/shop"));
        assert_eq!(env.get("JWT_SECRET"), Some("s3cr3t"));
        assert_eq!(
            status,
            EnvFileStatus::Loaded {
                path: path.clone(),
                added: 2,
                skipped: 1
            }
        );
        assert_eq!(status.path(), path.as_path());
    }

    #[test]
    fn test_dollar_signs_are_literal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "EMAIL_SENDER_PASS=pa$HOMEword\n\
             COOKIE_SECRET=ab${X}yz\n\
             JWT_SECRET=\"q$PATH\"\n\
             STRIPE_API_KEY='sk$live'\n",
        )
        .unwrap();

        let env = EnvSnapshot::from_pairs([("X", "expanded")]);
        let (env, _) = env.with_env_file(&path);

        assert_eq!(env.get("EMAIL_SENDER_PASS"), Some("pa$HOMEword"));
        assert_eq!(env.get("COOKIE_SECRET"), Some("ab${X}yz"));
        assert_eq!(env.get("JWT_SECRET"), Some("q$PATH"));
        assert_eq!(env.get("STRIPE_API_KEY"), Some("sk$live"));
    }

    #[test]
    fn test_unreadable_env_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be read as a file
        let path = dir.path().join(".env");
        fs::create_dir(&path).unwrap();

        let before = EnvSnapshot::from_pairs([("A", "1")]);
        let (after, status) = before.clone().with_env_file(&path);

        assert_eq!(before, after);
        assert!(matches!(status, EnvFileStatus::Unreadable { .. }));
    }

    #[test]
    fn test_non_empty_filters_blank_values() {
        let env = EnvSnapshot::from_pairs([("ADMIN_CORS", ""), ("STORE_CORS", "http://a")]);

        assert_eq!(env.get("ADMIN_CORS"), Some(""));
        assert_eq!(env.non_empty("ADMIN_CORS"), None);
        assert_eq!(env.non_empty("STORE_CORS"), Some("http://a"));
        assert_eq!(env.non_empty("UNSET"), None);
    }

    #[test]
    fn test_optional_keeps_empty_strings() {
        let env = EnvSnapshot::from_pairs([("S3_PREFIX", "")]);
        assert_eq!(env.optional("S3_PREFIX"), Some(String::new()));
        assert_eq!(env.optional("S3_BUCKET"), None);
    }
}
