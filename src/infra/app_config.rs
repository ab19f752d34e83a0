use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database file to use instead of the platform default.
    pub db_path: Option<PathBuf>,
    /// Re-read the full table after every successful registration.
    pub refresh_after_submit: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            refresh_after_submit: true,
        }
    }
}

pub fn load_config() -> AppConfig {
    load_config_from(&config_path())
}

/// Read a config file, falling back to defaults when it is missing or broken.
pub fn load_config_from(path: &Path) -> AppConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return AppConfig::default();
    };
    match toml::from_str(&contents) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Ignoring malformed config {}: {}", path.display(), err);
            AppConfig::default()
        }
    }
}

pub fn save_config(config: &AppConfig) -> Result<PathBuf> {
    let path = config_path();
    save_config_to(&path, config)?;
    Ok(path)
}

pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config).context("serializing config")?;
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Saved config to {}", path.display());
    Ok(())
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("REGISTRY_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    app_data_dir().join("config.toml")
}

pub fn app_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("REGISTRY_DATA_HOME") {
        return PathBuf::from(path);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("PersonRegistry");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("PersonRegistry");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("person-registry");
        }
        if let Some(home) = home::home_dir() {
            return home.join(".local").join("share").join("person-registry");
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".person-registry")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_refresh_after_submit() {
        let config = AppConfig::default();
        assert!(config.db_path.is_none());
        assert!(config.refresh_after_submit);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(r#"db_path = "/tmp/people.db""#).unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/people.db")));
        assert!(config.refresh_after_submit);

        let config: AppConfig = toml::from_str("refresh_after_submit = false").unwrap();
        assert!(config.db_path.is_none());
        assert!(!config.refresh_after_submit);
    }

    #[test]
    fn test_save_then_load_from_file() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            db_path: Some(PathBuf::from("/srv/people.db")),
            refresh_after_submit: false,
        };

        save_config_to(&path, &config)?;
        assert_eq!(load_config_from(&path), config);
        Ok(())
    }

    #[test]
    fn test_missing_or_malformed_file_gives_defaults() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("config.toml");
        assert_eq!(load_config_from(&path), AppConfig::default());

        std::fs::write(&path, "refresh_after_submit = \"sometimes\"")?;
        assert_eq!(load_config_from(&path), AppConfig::default());
        Ok(())
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = AppConfig {
            db_path: Some(PathBuf::from("people.db")),
            refresh_after_submit: false,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
