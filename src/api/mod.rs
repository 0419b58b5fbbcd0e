//! Transport-neutral request handlers for the preset endpoints.
//!
//! Each handler returns an [`ApiResponse`] (status plus JSON body) and never
//! propagates an error; failures are logged with their cause and reported by
//! category.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::WorkspacePaths;
use crate::error::ErrorCategory;
use crate::preset::{apply_preset as apply, PresetError, PresetLibrary};
use crate::theme::ThemeStore;

const LIST_FAILED: &str = "Failed to read presets";
const APPLY_FAILED: &str = "Failed to apply preset";
const MISSING_FIELDS: &str = "Missing presetId or mode";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn failure(category: ErrorCategory, message: &str) -> Self {
        Self {
            status: category.status(),
            body: json!({
                "error": message,
                "category": category.as_str(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Body of an apply request. Fields stay loosely typed so a wrong type is
/// reported as missing input rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplyRequest {
    #[serde(default)]
    preset_id: Option<Value>,
    #[serde(default)]
    mode: Option<Value>,
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// `GET /api/presets`
pub fn list_presets(paths: &WorkspacePaths) -> ApiResponse {
    let library = PresetLibrary::new(&paths.presets_dir);
    match library.list() {
        Ok(presets) => match serde_json::to_value(presets) {
            Ok(body) => ApiResponse::ok(body),
            Err(err) => {
                tracing::error!(?err, "failed to serialize preset listing");
                ApiResponse::failure(ErrorCategory::CollectionRead, LIST_FAILED)
            }
        },
        Err(err) => {
            tracing::error!(?err, dir = %library.dir().display(), "error reading presets");
            ApiResponse::failure(ErrorCategory::CollectionRead, LIST_FAILED)
        }
    }
}

/// `POST /api/presets/apply` with a JSON body `{ "presetId", "mode" }`.
pub fn apply_preset(paths: &WorkspacePaths, body: &str) -> ApiResponse {
    let request: ApplyRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(?err, "rejecting malformed apply request body");
            return ApiResponse::failure(ErrorCategory::ClientInput, MISSING_FIELDS);
        }
    };
    let (Some(preset_id), Some(mode)) = (
        non_empty_str(request.preset_id.as_ref()),
        non_empty_str(request.mode.as_ref()),
    ) else {
        tracing::warn!("rejecting apply request without presetId or mode");
        return ApiResponse::failure(ErrorCategory::ClientInput, MISSING_FIELDS);
    };

    let library = PresetLibrary::new(&paths.presets_dir);
    let store = ThemeStore::new(&paths.colors_path).with_write_mode(paths.write_mode);
    match apply(&library, &store, preset_id, mode) {
        Ok(applied) => ApiResponse::ok(json!({
            "success": true,
            "message": applied.message(),
        })),
        Err(err) => apply_failure(&err, preset_id, mode),
    }
}

fn apply_failure(err: &PresetError, preset_id: &str, mode: &str) -> ApiResponse {
    let category = err.category();
    if category.is_internal() {
        tracing::error!(?err, preset = preset_id, mode, "error applying preset");
        ApiResponse::failure(category, APPLY_FAILED)
    } else {
        tracing::warn!(%err, preset = preset_id, mode, "apply preset rejected");
        ApiResponse::failure(category, &err.to_string())
    }
}
