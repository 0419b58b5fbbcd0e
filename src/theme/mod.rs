use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::WriteMode;
use crate::error::ErrorCategory;

const THEMES_KEY: &str = "themes";
const SEMANTIC_KEY: &str = "semantic";

pub type ThemeResult<T> = std::result::Result<T, ThemeError>;

/// Named color slots of one group, e.g. `primary` → `#1e1e2e`.
pub type ColorGroup = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("theme store not found: {path}")]
    MissingStore { path: PathBuf },
    #[error("failed to read theme store: {path}")]
    ReadStore { path: PathBuf, source: io::Error },
    #[error("failed to write theme store: {path}")]
    WriteStore { path: PathBuf, source: io::Error },
    #[error("failed to parse theme store")]
    ParseStore(#[from] serde_json::Error),
    #[error("failed to serialize theme store")]
    SerializeStore(#[source] serde_json::Error),
    #[error("invalid theme store: {reason}")]
    InvalidStore { reason: String },
    #[error("theme mode not found: {mode}")]
    UnknownMode { mode: String },
    #[error("failed to parse theme mode {mode}")]
    ParseMode {
        mode: String,
        source: serde_json::Error,
    },
}

impl ThemeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingStore { .. } | Self::UnknownMode { .. } => ErrorCategory::NotFound,
            Self::ReadStore { .. }
            | Self::ParseStore(_)
            | Self::InvalidStore { .. }
            | Self::ParseMode { .. } => ErrorCategory::Parse,
            Self::WriteStore { .. } | Self::SerializeStore(_) => ErrorCategory::Write,
        }
    }
}

/// The three color groups a theme mode is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Background,
    Foreground,
    Semantic,
}

impl Group {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Foreground => "foreground",
            Self::Semantic => "semantic",
        }
    }
}

/// Colors of a single mode. Values are opaque and copied as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTheme {
    #[serde(default)]
    pub background: ColorGroup,
    #[serde(default)]
    pub foreground: ColorGroup,
    pub semantic: ColorGroup,
}

impl ColorTheme {
    pub fn group(&self, group: Group) -> &ColorGroup {
        match group {
            Group::Background => &self.background,
            Group::Foreground => &self.foreground,
            Group::Semantic => &self.semantic,
        }
    }

    /// Color stored in `group.name`. Empty strings count as unset.
    pub fn slot(&self, group: Group, name: &str) -> Option<&str> {
        self.group(group)
            .get(name)
            .map(String::as_str)
            .filter(|color| !color.is_empty())
    }
}

/// A parsed theme store.
///
/// The mode map is either the root object or, when the root carries an
/// object-valued `themes` key, that nested object. Everything else in the
/// document is kept untouched so a save rewrites it verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDocument {
    root: Map<String, Value>,
    nested: bool,
}

impl ThemeDocument {
    pub fn parse(serialized: &str) -> ThemeResult<Self> {
        let raw: Value = serde_json::from_str(serialized)?;
        Self::from_value(raw)
    }

    pub fn from_value(raw: Value) -> ThemeResult<Self> {
        let Value::Object(root) = raw else {
            return Err(ThemeError::InvalidStore {
                reason: "root is not a JSON object".to_string(),
            });
        };
        let nested = matches!(root.get(THEMES_KEY), Some(Value::Object(_)));
        Ok(Self { root, nested })
    }

    fn mode_map(&self) -> Option<&Map<String, Value>> {
        if self.nested {
            self.root.get(THEMES_KEY).and_then(Value::as_object)
        } else {
            Some(&self.root)
        }
    }

    fn mode_map_mut(&mut self) -> Option<&mut Map<String, Value>> {
        if self.nested {
            self.root.get_mut(THEMES_KEY).and_then(Value::as_object_mut)
        } else {
            Some(&mut self.root)
        }
    }

    /// Keys of the mode map whose value is an object. Scalars next to the
    /// modes (such as a bare-layout `"version"`) are not modes.
    pub fn mode_names(&self) -> Vec<&str> {
        self.mode_map()
            .map(|modes| {
                modes
                    .iter()
                    .filter(|(_, value)| value.is_object())
                    .map(|(name, _)| name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn color_theme(&self, mode: &str) -> ThemeResult<ColorTheme> {
        let raw = self
            .mode_map()
            .and_then(|modes| modes.get(mode))
            .filter(|raw| raw.is_object())
            .ok_or_else(|| ThemeError::UnknownMode {
                mode: mode.to_string(),
            })?;
        ColorTheme::deserialize(raw).map_err(|source| ThemeError::ParseMode {
            mode: mode.to_string(),
            source,
        })
    }

    pub fn semantic_mut(&mut self, mode: &str) -> ThemeResult<&mut Map<String, Value>> {
        let raw = self
            .mode_map_mut()
            .and_then(|modes| modes.get_mut(mode))
            .filter(|raw| raw.is_object())
            .ok_or_else(|| ThemeError::UnknownMode {
                mode: mode.to_string(),
            })?;
        raw.get_mut(SEMANTIC_KEY)
            .and_then(Value::as_object_mut)
            .ok_or_else(|| ThemeError::InvalidStore {
                reason: format!("mode {mode} has no semantic group"),
            })
    }

    /// Copy every entry of `colors` into `mode`'s semantic group, overwriting
    /// existing roles. Returns how many entries changed.
    pub fn merge_semantic(&mut self, mode: &str, colors: &ColorGroup) -> ThemeResult<usize> {
        let semantic = self.semantic_mut(mode)?;
        let mut changed = 0;
        for (role, color) in colors {
            if semantic.get(role).and_then(Value::as_str) != Some(color.as_str()) {
                semantic.insert(role.clone(), Value::String(color.clone()));
                changed += 1;
            }
        }
        Ok(changed)
    }

    pub fn to_pretty_json(&self) -> ThemeResult<String> {
        serde_json::to_string_pretty(&self.root).map_err(ThemeError::SerializeStore)
    }
}

/// File-backed theme store. Every call reads or writes the file afresh.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
    write_mode: WriteMode,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_mode: WriteMode::Direct,
        }
    }

    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> ThemeResult<ThemeDocument> {
        let serialized = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ThemeError::MissingStore {
                    path: self.path.clone(),
                }
            } else {
                ThemeError::ReadStore {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        let document = ThemeDocument::parse(&serialized)?;
        tracing::debug!(path = %self.path.display(), modes = ?document.mode_names(), "loaded theme store");
        Ok(document)
    }

    pub fn load_mode(&self, mode: &str) -> ThemeResult<ColorTheme> {
        self.load()?.color_theme(mode)
    }

    pub fn save(&self, document: &ThemeDocument) -> ThemeResult<()> {
        let serialized = document.to_pretty_json()?;
        let result = match self.write_mode {
            WriteMode::Direct => fs::write(&self.path, serialized),
            WriteMode::Atomic => write_atomic(&self.path, &serialized),
        };
        result.map_err(|source| ThemeError::WriteStore {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), write_mode = ?self.write_mode, "saved theme store");
        Ok(())
    }
}

static TEMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("colors.json");
    let sequence = TEMP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let temp_path = path.with_file_name(format!(
        ".{file_name}.{}.{sequence}.tmp",
        std::process::id()
    ));

    if let Err(err) = fs::write(&temp_path, contents) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    fs::rename(&temp_path, path).inspect_err(|_| {
        let _ = fs::remove_file(&temp_path);
    })
}
