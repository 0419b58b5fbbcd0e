use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ErrorCategory;
use crate::theme::{ColorGroup, ThemeError, ThemeStore};

const PRESET_EXTENSION: &str = "json";

pub type PresetResult<T> = std::result::Result<T, PresetError>;

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("invalid preset id: {id:?}")]
    InvalidId { id: String },
    #[error("preset not found: {id}")]
    NotFound { id: String, path: PathBuf },
    #[error("failed to read preset: {path}")]
    ReadPreset { path: PathBuf, source: io::Error },
    #[error("failed to parse preset: {path}")]
    ParsePreset {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to read preset collection: {path}")]
    ReadCollection { path: PathBuf, source: io::Error },
    #[error("failed to parse preset collection entry: {path}")]
    ParseCollectionEntry {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Theme(#[from] ThemeError),
}

impl PresetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidId { .. } => ErrorCategory::ClientInput,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::ReadPreset { .. } | Self::ParsePreset { .. } => ErrorCategory::Parse,
            Self::ReadCollection { .. } | Self::ParseCollectionEntry { .. } => {
                ErrorCategory::CollectionRead
            }
            Self::Theme(err) => err.category(),
        }
    }
}

/// A named bundle of semantic colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Role name to color string. Required.
    pub semantic: ColorGroup,
}

/// Display metadata of a stored preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedPreset {
    pub name: String,
    pub mode: String,
}

impl AppliedPreset {
    pub fn message(&self) -> String {
        format!("Applied preset \"{}\" to {} theme", self.name, self.mode)
    }
}

/// Directory of `<id>.json` preset documents.
#[derive(Debug, Clone)]
pub struct PresetLibrary {
    dir: PathBuf,
}

impl PresetLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Summaries of every preset, in directory enumeration order.
    ///
    /// Any unreadable or malformed entry fails the whole listing.
    pub fn list(&self) -> PresetResult<Vec<PresetSummary>> {
        let read_collection = |source: io::Error| PresetError::ReadCollection {
            path: self.dir.clone(),
            source,
        };

        let mut summaries = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(read_collection)? {
            let path = entry.map_err(read_collection)?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PRESET_EXTENSION) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                tracing::warn!(path = %path.display(), "skipping preset with non UTF-8 file name");
                continue;
            };

            let serialized =
                fs::read_to_string(&path).map_err(|source| PresetError::ReadCollection {
                    path: path.clone(),
                    source,
                })?;
            let preset: Preset = serde_json::from_str(&serialized).map_err(|source| {
                PresetError::ParseCollectionEntry {
                    path: path.clone(),
                    source,
                }
            })?;

            summaries.push(PresetSummary {
                id: id.to_string(),
                name: preset.name,
                description: preset.description,
            });
        }

        tracing::debug!(dir = %self.dir.display(), count = summaries.len(), "listed presets");
        Ok(summaries)
    }

    pub fn path_for(&self, id: &str) -> PresetResult<PathBuf> {
        validate_preset_id(id)?;
        Ok(self.dir.join(format!("{id}.{PRESET_EXTENSION}")))
    }

    pub fn load(&self, id: &str) -> PresetResult<Preset> {
        let path = self.path_for(id)?;
        let serialized = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                PresetError::NotFound {
                    id: id.to_string(),
                    path: path.clone(),
                }
            } else {
                PresetError::ReadPreset {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        serde_json::from_str(&serialized).map_err(|source| PresetError::ParsePreset { path, source })
    }
}

/// Ids name a file inside the preset directory, never a path out of it.
fn validate_preset_id(id: &str) -> PresetResult<()> {
    let is_valid = !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\'])
        && !id.contains('\0');
    if is_valid {
        Ok(())
    } else {
        Err(PresetError::InvalidId { id: id.to_string() })
    }
}

/// Copy the preset's semantic colors into `mode` and write the store back.
///
/// Nothing is written unless the preset, the store and the mode all resolve.
pub fn apply_preset(
    library: &PresetLibrary,
    store: &ThemeStore,
    preset_id: &str,
    mode: &str,
) -> PresetResult<AppliedPreset> {
    let preset = library.load(preset_id)?;
    let mut document = store.load()?;

    let changed = document.merge_semantic(mode, &preset.semantic)?;
    store.save(&document)?;

    tracing::info!(
        preset = preset_id,
        mode,
        store = %store.path().display(),
        roles = preset.semantic.len(),
        changed,
        "applied preset"
    );
    Ok(AppliedPreset {
        name: preset.name,
        mode: mode.to_string(),
    })
}
