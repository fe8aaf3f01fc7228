//! Builds `Settings` from TOML files plus `RAQUETAS_*` environment variables.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "RAQUETAS_CONFIG_DIR";
const CONFIG_FILE_ENV: &str = "RAQUETAS_CONFIG_FILE";
const DEFAULT_CONFIG_DIR: &str = "config";

/// Loads the configuration tree.
///
/// In layered mode the files below are merged in order, later ones winning:
///
/// 1. `default.toml` (required)
/// 2. `{environment}.toml`
/// 3. `local.toml`
///
/// A single configuration file replaces all three. Either way
/// `RAQUETAS_<SECTION>__<KEY>` variables are applied last, so
/// `RAQUETAS_SERVER__PORT=9000` sets `server.port`.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Reads `RAQUETAS_CONFIG_DIR`, `RAQUETAS_CONFIG_FILE` and
    /// `RAQUETAS_APP_ENV`. Setting both of the first two is an error.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from);
        let config_file = std::env::var_os(CONFIG_FILE_ENV).map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(format!(
                "{} (layered directory) and {} (single file) are mutually exclusive",
                CONFIG_DIR_ENV, CONFIG_FILE_ENV
            )));
        }

        let mut loader = Self::from_dir(config_dir.unwrap_or_else(|| DEFAULT_CONFIG_DIR.into()))
            .with_environment(AppEnvironment::from_env());
        loader.config_file = config_file;
        Ok(loader)
    }

    pub fn from_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            config_file: None,
            environment: AppEnvironment::default(),
        }
    }

    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Loads and validates.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads without validating, so CLI overrides can be applied first.
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        let mut builder = Config::builder();

        for (path, required) in self.file_layers() {
            if required && !path.exists() {
                return Err(ConfigError::file_not_found(format!(
                    "Required configuration file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }

        builder
            .add_source(
                Environment::with_prefix("RAQUETAS")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e)))
    }

    /// Files to merge, lowest priority first, each flagged as required or not.
    fn file_layers(&self) -> Vec<(PathBuf, bool)> {
        if let Some(file) = &self.config_file {
            return vec![(file.clone(), true)];
        }

        let env_file = format!("{}.toml", self.environment.as_str());
        vec![
            (self.config_dir.join("default.toml"), true),
            (self.config_dir.join(env_file), false),
            (self.config_dir.join("local.toml"), false),
        ]
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::from_dir(DEFAULT_CONFIG_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::StorageBackend;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // RAQUETAS_* variables are process-wide
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const DEFAULT_TOML: &str = r#"
[application]
name = "raquetas-test"

[server]
port = 8080

[storage]
backend = "memory"
"#;

    fn config_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    /// Sets or clears variables for the duration of `f`, then restores them.
    fn with_env<T>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> T) -> T {
        let saved: Vec<_> = vars.iter().map(|(k, _)| (*k, std::env::var(k).ok())).collect();
        let apply = |key: &str, value: Option<&str>| unsafe {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        };

        for (key, value) in vars {
            apply(*key, *value);
        }
        let result = f();
        for (key, value) in &saved {
            apply(*key, value.as_deref());
        }
        result
    }

    #[test]
    fn test_new_without_variables_uses_defaults() {
        let _lock = ENV_LOCK.lock().unwrap();
        let loader = with_env(
            &[
                (CONFIG_DIR_ENV, None),
                (CONFIG_FILE_ENV, None),
                (AppEnvironment::ENV_VAR, None),
            ],
            ConfigLoader::new,
        )
        .unwrap();

        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_new_reads_variables() {
        let _lock = ENV_LOCK.lock().unwrap();
        let loader = with_env(
            &[
                (CONFIG_DIR_ENV, Some("/srv/raquetas")),
                (CONFIG_FILE_ENV, None),
                (AppEnvironment::ENV_VAR, Some("prod")),
            ],
            ConfigLoader::new,
        )
        .unwrap();

        assert_eq!(loader.config_dir(), Path::new("/srv/raquetas"));
        assert_eq!(loader.environment(), AppEnvironment::Production);
    }

    #[test]
    fn test_dir_and_file_variables_conflict() {
        let _lock = ENV_LOCK.lock().unwrap();
        let result = with_env(
            &[
                (CONFIG_DIR_ENV, Some("/srv/raquetas")),
                (CONFIG_FILE_ENV, Some("/srv/raquetas.toml")),
            ],
            ConfigLoader::new,
        );

        assert!(matches!(result, Err(ConfigError::MutualExclusivityError(_))));
    }

    #[test]
    fn test_missing_default_toml() {
        let _lock = ENV_LOCK.lock().unwrap();
        let dir = config_dir(&[]);

        match ConfigLoader::from_dir(dir.path()).load() {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_layers_merge_in_order() {
        let _lock = ENV_LOCK.lock().unwrap();
        let dir = config_dir(&[
            ("default.toml", DEFAULT_TOML),
            ("production.toml", "[server]\nport = 9000\n[logger]\nlevel = \"warn\"\n"),
            ("staging.toml", "[server]\nport = 9500\n"),
            ("local.toml", "[server]\nport = 9100\n"),
        ]);

        let settings = ConfigLoader::from_dir(dir.path())
            .with_environment(AppEnvironment::Production)
            .load()
            .unwrap();

        assert_eq!(settings.application.name, "raquetas-test");
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.logger.level, "warn");
    }

    #[test]
    fn test_env_variables_win_over_files() {
        let _lock = ENV_LOCK.lock().unwrap();
        let dir = config_dir(&[("default.toml", DEFAULT_TOML)]);

        let settings = with_env(
            &[
                ("RAQUETAS_SERVER__PORT", Some("9300")),
                ("RAQUETAS_STORAGE__SEED_DEMO_DATA", Some("true")),
            ],
            || ConfigLoader::from_dir(dir.path()).load(),
        )
        .unwrap();

        assert_eq!(settings.server.port, 9300);
        assert!(settings.storage.seed_demo_data);
    }

    #[test]
    fn test_single_file_skips_directory() {
        let _lock = ENV_LOCK.lock().unwrap();
        let layered = config_dir(&[("default.toml", DEFAULT_TOML)]);
        let single = config_dir(&[(
            "custom.toml",
            "[server]\nport = 7000\n[storage]\nbackend = \"postgres\"\n[database]\nurl = \"postgres://localhost/raquetas\"\n",
        )]);

        let settings = ConfigLoader::from_dir(layered.path())
            .with_config_file(single.path().join("custom.toml"))
            .load()
            .unwrap();

        assert_eq!(settings.server.port, 7000);
        assert_eq!(settings.storage.backend, StorageBackend::Postgres);
        assert_eq!(settings.application.name, "raquetas-rs");
    }

    #[test]
    fn test_load_validates_but_unvalidated_does_not() {
        let _lock = ENV_LOCK.lock().unwrap();
        let dir = config_dir(&[("default.toml", "[storage]\nbackend = \"postgres\"\n")]);
        let loader = ConfigLoader::from_dir(dir.path());

        assert!(matches!(
            loader.load(),
            Err(ConfigError::ValidationError { field, .. }) if field == "database.url"
        ));
        assert!(loader.load_unvalidated().is_ok());
    }
}
