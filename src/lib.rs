pub mod api;
pub mod cli;
mod config;
pub mod error;
pub mod logging;
pub mod preset;
pub mod preview;
pub mod theme;
pub use config::{AppConfig, WorkspacePaths, WriteMode};
pub use error::{AppError, AppResult};

/// Entrypoint used by the `theme-viewer` binary.
pub fn run() -> AppResult<()> {
    logging::init();
    tracing::debug!("starting theme-viewer");
    cli::run_from_env()
}
