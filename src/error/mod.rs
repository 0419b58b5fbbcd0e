use crate::preset::PresetError;
use crate::theme::ThemeError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

/// Coarse failure classes reported to callers of the request handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    ClientInput,
    NotFound,
    Parse,
    Write,
    CollectionRead,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClientInput => "client_input",
            Self::NotFound => "not_found",
            Self::Parse => "parse",
            Self::Write => "write",
            Self::CollectionRead => "collection_read",
        }
    }

    /// Status code used by the request handlers.
    pub fn status(self) -> u16 {
        match self {
            Self::ClientInput => 400,
            Self::NotFound => 404,
            Self::Parse | Self::Write | Self::CollectionRead => 500,
        }
    }

    pub fn is_internal(self) -> bool {
        self.status() >= 500
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error(transparent)]
    Preset(#[from] PresetError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Theme(err) => err.category(),
            Self::Preset(err) => err.category(),
            Self::Io(_) => ErrorCategory::Write,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_categories_map_to_server_status() {
        assert_eq!(ErrorCategory::ClientInput.status(), 400);
        assert_eq!(ErrorCategory::NotFound.status(), 404);
        assert!(ErrorCategory::Parse.is_internal());
        assert!(ErrorCategory::Write.is_internal());
        assert!(ErrorCategory::CollectionRead.is_internal());
        assert!(!ErrorCategory::NotFound.is_internal());
    }

    #[test]
    fn app_error_delegates_category_to_source() {
        let err = AppError::from(ThemeError::UnknownMode {
            mode: "sepia".to_string(),
        });
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(err.to_string(), "theme mode not found: sepia");
    }
}
