use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::preview::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum ConfigPathError {
    #[error("neither XDG_CONFIG_HOME nor HOME is set")]
    MissingHomeDirectory,
}

const APP_DIR: &str = "theme-viewer";
const APP_CONFIG_FILE: &str = "config.json";
const DEFAULT_COLORS_FILE: &str = "colors.json";
const DEFAULT_PRESETS_DIR: &str = "presets";

/// How the theme store is written back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate and rewrite the store in place.
    #[default]
    Direct,
    /// Write a sibling temporary file, then rename it over the store.
    Atomic,
}

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub colors_path: Option<PathBuf>,
    #[serde(default)]
    pub presets_dir: Option<PathBuf>,
    #[serde(default)]
    pub write_mode: WriteMode,
    #[serde(default)]
    pub language: Option<Language>,
}

/// Resolved locations of the theme store and preset collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    pub colors_path: PathBuf,
    pub presets_dir: PathBuf,
    pub write_mode: WriteMode,
}

impl WorkspacePaths {
    pub fn new(colors_path: PathBuf, presets_dir: PathBuf) -> Self {
        Self {
            colors_path,
            presets_dir,
            write_mode: WriteMode::Direct,
        }
    }

    /// Default layout under `root`: `colors.json` next to a `presets/` directory.
    pub fn under_root(root: &Path) -> Self {
        Self::new(root.join(DEFAULT_COLORS_FILE), root.join(DEFAULT_PRESETS_DIR))
    }

    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    /// Apply `config` on top of the default layout. Relative paths in the
    /// config resolve against `root`.
    pub fn resolve(root: &Path, config: &AppConfig) -> Self {
        let mut paths = Self::under_root(root).with_write_mode(config.write_mode);
        if let Some(colors_path) = config.colors_path.as_deref() {
            paths.colors_path = root.join(colors_path);
        }
        if let Some(presets_dir) = config.presets_dir.as_deref() {
            paths.presets_dir = root.join(presets_dir);
        }
        paths
    }
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(err) => {
            tracing::debug!(%err, "no config directory; using defaults");
            return AppConfig::default();
        }
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn with_temp_root<F: FnOnce(&Path)>(f: F) {
        let mut root = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        root.push(format!("theme-viewer-config-{}-{nanos}", std::process::id()));
        fs::create_dir_all(&root).unwrap();
        f(&root);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "theme-viewer",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/config-root/theme-viewer/config.json")
        );
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(
            "theme-viewer",
            "config.json",
            Some(Path::new("")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/home/.config/theme-viewer/config.json")
        );
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("theme-viewer", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn unresolvable_config_directory_yields_defaults() {
        let config = load_app_config_with(None, None);
        assert!(config.colors_path.is_none());
        assert_eq!(config.write_mode, WriteMode::Direct);
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        with_temp_root(|root| {
            let config = load_app_config_with(Some(root), None);
            assert!(config.colors_path.is_none());
            assert!(config.presets_dir.is_none());
            assert_eq!(config.write_mode, WriteMode::Direct);
            assert!(config.language.is_none());
        });
    }

    #[test]
    fn malformed_config_file_yields_defaults() {
        with_temp_root(|root| {
            let dir = root.join(APP_DIR);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(APP_CONFIG_FILE), "{ not json").unwrap();

            let config = load_app_config_with(Some(root), None);
            assert_eq!(config.write_mode, WriteMode::Direct);
        });
    }

    #[test]
    fn config_file_fields_are_parsed() {
        with_temp_root(|root| {
            let dir = root.join(APP_DIR);
            fs::create_dir_all(&dir).unwrap();
            fs::write(
                dir.join(APP_CONFIG_FILE),
                r#"{
                    "colors_path": "themes/colors.json",
                    "presets_dir": "/srv/presets",
                    "write_mode": "atomic",
                    "language": "csharp"
                }"#,
            )
            .unwrap();

            let config = load_app_config_with(Some(root), None);
            assert_eq!(
                config.colors_path.as_deref(),
                Some(Path::new("themes/colors.json"))
            );
            assert_eq!(config.write_mode, WriteMode::Atomic);
            assert_eq!(config.language, Some(Language::CSharp));

            let paths = WorkspacePaths::resolve(Path::new("/work"), &config);
            assert_eq!(paths.colors_path, PathBuf::from("/work/themes/colors.json"));
            assert_eq!(paths.presets_dir, PathBuf::from("/srv/presets"));
            assert_eq!(paths.write_mode, WriteMode::Atomic);
        });
    }

    #[test]
    fn default_layout_places_store_next_to_presets() {
        let paths = WorkspacePaths::resolve(Path::new("/work"), &AppConfig::default());
        assert_eq!(paths.colors_path, PathBuf::from("/work/colors.json"));
        assert_eq!(paths.presets_dir, PathBuf::from("/work/presets"));
        assert_eq!(paths.write_mode, WriteMode::Direct);
    }
}
