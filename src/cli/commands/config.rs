//! Config Commands
//!
//! Usage:
//!   medusa-config show [-f json|yaml] [--mode <mode>] [--root <dir>]
//!   medusa-config env-file [--mode <mode>] [--root <dir>]
//!   medusa-config check <file> [-f json|yaml]

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::Output;
use crate::config::{
    ConfigLoader, ConfigModule, EnvFileStatus, EnvSnapshot, ExportFormat, LoadedConfig, Mode,
};
use crate::types::{Result, ResultExt};

/// Print the assembled export object
pub fn show(root: Option<PathBuf>, mode: Option<Mode>, format: &str) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let root = root.unwrap_or_else(ConfigLoader::project_root);
    let loaded = load(&root, EnvSnapshot::capture(), mode)?;

    debug!("Env file: {}", loaded.env_file);
    println!("{}", loaded.module.render(format)?);
    Ok(())
}

/// Load honoring an explicit mode over `NODE_ENV`
pub fn load(root: &Path, env: EnvSnapshot, mode: Option<Mode>) -> Result<LoadedConfig> {
    match mode {
        Some(mode) => ConfigLoader::load_with_mode(root, env, mode),
        None => ConfigLoader::load_from(root, env),
    }
}

/// Print which env file the mode selects and what loading it yields
pub fn env_file(root: Option<PathBuf>, mode: Option<Mode>) -> Result<()> {
    let root = root.unwrap_or_else(ConfigLoader::project_root);
    let (mode, status) = inspect_env_file(&root, EnvSnapshot::capture(), mode);

    let out = Output::new();
    out.section("Environment");
    out.check("Mode", true, &mode.to_string());
    out.check(
        "Env file",
        status.is_loaded(),
        &status.path().display().to_string(),
    );
    if let EnvFileStatus::Loaded { added, skipped, .. } = &status {
        out.check("Keys", *skipped == 0, &format!("{} new, {} lines skipped", added, skipped));
    }
    Ok(())
}

/// Resolve the mode and load its env file into `env`
pub fn inspect_env_file(root: &Path, env: EnvSnapshot, mode: Option<Mode>) -> (Mode, EnvFileStatus) {
    let mode = mode.unwrap_or_else(|| Mode::from_env(&env));
    let path = ConfigLoader::env_file_path(root, mode);
    let (_, status) = env.with_env_file(&path);
    (mode, status)
}

/// Strictly parse an exported config file and summarize it
pub fn check(path: &Path, format: Option<&str>) -> Result<()> {
    let module = load_export(path, format)?;
    let project = &module.project_config;

    let out = Output::new();
    out.success(&format!("{} is a valid configuration", path.display()));

    out.section("Project");
    out.check("Admin", true, &project.admin_origins().join(", "));
    out.check("Store", true, &project.store_origins().join(", "));

    out.section("Plugins");
    for (i, plugin) in module.plugins.iter().enumerate() {
        let detail = if plugin.has_options() { "(options)" } else { "" };
        out.item(i + 1, plugin.resolve(), detail);
    }

    out.section("Modules");
    for (key, module_override) in module.modules.entries() {
        out.check(key, true, &module_override.resolve);
    }

    let insecure = project.insecure_defaults();
    if !insecure.is_empty() {
        out.warning(&format!(
            "Development secrets in use: {}",
            insecure.join(", ")
        ));
    }

    Ok(())
}

/// Read and strictly parse an export file. The format defaults to the file
/// extension, falling back to JSON.
pub fn load_export(path: &Path, format: Option<&str>) -> Result<ConfigModule> {
    let format: ExportFormat = match format {
        Some(f) => f.parse()?,
        None => match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => ExportFormat::Yaml,
            _ => ExportFormat::Json,
        },
    };

    let raw = std::fs::read_to_string(path)?;
    ConfigModule::parse(&raw, format).with_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConfigError;
    use std::fs;
    use tempfile::TempDir;

    fn exported() -> ConfigModule {
        ConfigLoader::assemble(&EnvSnapshot::from_pairs([("S3_BUCKET", "media")])).unwrap()
    }

    #[test]
    fn test_load_export_infers_format_from_extension() {
        let dir = TempDir::new().unwrap();
        let module = exported();

        let yaml_path = dir.path().join("medusa-config.yml");
        fs::write(&yaml_path, module.to_yaml().unwrap()).unwrap();
        assert_eq!(load_export(&yaml_path, None).unwrap(), module);

        let json_path = dir.path().join("medusa-config.json");
        fs::write(&json_path, module.to_json_pretty().unwrap()).unwrap();
        assert_eq!(load_export(&json_path, None).unwrap(), module);
    }

    #[test]
    fn test_load_export_reports_path_on_bad_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        let mut value = serde_json::to_value(exported()).unwrap();
        value["projectConfig"]["http_compression"] = serde_json::json!(true);
        fs::write(&path, value.to_string()).unwrap();

        match load_export(&path, None).unwrap_err() {
            ConfigError::Parse { path: reported, message } => {
                assert!(reported.ends_with("broken.json"));
                assert!(message.contains("http_compression"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_export_rejects_unknown_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("medusa-config.json");
        fs::write(&path, "{}").unwrap();

        assert!(matches!(
            load_export(&path, Some("toml")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_export_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_export(&dir.path().join("absent.json"), None).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_mode_override_selects_env_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env"), "DATABASE_URL=postgres://dev/shop\n").unwrap();
        fs::write(
            dir.path().join(".env.staging"),
            "DATABASE_URL=postgres://staging/shop\n",
        )
        .unwrap();

        let env = EnvSnapshot::from_pairs([("NODE_ENV", "development")]);
        let loaded = load(dir.path(), env.clone(), Some(Mode::Staging)).unwrap();
        assert_eq!(loaded.mode, Mode::Staging);
        assert_eq!(
            loaded.module.project_config.database_url,
            "postgres://staging/shop"
        );

        let loaded = load(dir.path(), env, None).unwrap();
        assert_eq!(loaded.mode, Mode::Development);
        assert_eq!(loaded.module.project_config.database_url, "postgres://dev/shop");
    }

    #[test]
    fn test_inspect_env_file_reports_override() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env.test"), "REDIS_URL=redis://test:6379\nbroken line\n")
            .unwrap();

        let env = EnvSnapshot::from_pairs([("NODE_ENV", "production")]);
        let (mode, status) = inspect_env_file(dir.path(), env.clone(), Some(Mode::Test));
        assert_eq!(mode, Mode::Test);
        assert_eq!(
            status,
            EnvFileStatus::Loaded {
                path: dir.path().join(".env.test"),
                added: 1,
                skipped: 1
            }
        );

        let (mode, status) = inspect_env_file(dir.path(), env, None);
        assert_eq!(mode, Mode::Production);
        assert_eq!(
            status,
            EnvFileStatus::Missing {
                path: dir.path().join(".env.production")
            }
        );
    }
}
