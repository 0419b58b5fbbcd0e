use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{self, AppConfig, WorkspacePaths, WriteMode};
use crate::error::AppResult;
use crate::preset::{self, PresetLibrary};
use crate::preview::{self, HtmlOptions, Language};
use crate::theme::ThemeStore;

#[derive(Debug, Parser)]
#[command(
    name = "theme-viewer",
    about = "Preview color themes and apply semantic color presets",
    version
)]
pub struct Cli {
    /// Workspace holding `colors.json` and `presets/` (default: current directory).
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Theme store file, overriding the configured location.
    #[arg(long, global = true)]
    pub colors: Option<PathBuf>,

    /// Preset directory, overriding the configured location.
    #[arg(long, global = true)]
    pub presets: Option<PathBuf>,

    /// Replace the theme store through a temporary file and rename.
    #[arg(long, global = true)]
    pub atomic: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the preset collection as JSON.
    List,

    /// Merge a preset's semantic colors into a theme mode.
    Apply { preset_id: String, mode: String },

    /// Render the code preview for a theme mode.
    Render(RenderArgs),

    /// Print the modes present in the theme store.
    Modes,
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    pub mode: String,

    /// Sample language (`typescript` or `csharp`).
    #[arg(long)]
    pub language: Option<Language>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// CSS font stack for the HTML container.
    #[arg(long)]
    pub font_family: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Text,
}

impl Cli {
    fn workspace_paths(&self, config: &AppConfig) -> AppResult<WorkspacePaths> {
        let root = match self.root.clone() {
            Some(root) => root,
            None => std::env::current_dir()?,
        };
        let mut paths = WorkspacePaths::resolve(&root, config);
        if let Some(colors) = self.colors.as_ref() {
            paths.colors_path = colors.clone();
        }
        if let Some(presets) = self.presets.as_ref() {
            paths.presets_dir = presets.clone();
        }
        if self.atomic {
            paths.write_mode = WriteMode::Atomic;
        }
        Ok(paths)
    }
}

pub fn run_from_env() -> AppResult<()> {
    let cli = Cli::parse();
    let config = config::load_app_config();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &config, &mut out)
}

pub fn run<W: Write>(cli: Cli, config: &AppConfig, out: &mut W) -> AppResult<()> {
    let paths = cli.workspace_paths(config)?;
    tracing::debug!(
        colors = %paths.colors_path.display(),
        presets = %paths.presets_dir.display(),
        write_mode = ?paths.write_mode,
        "resolved workspace"
    );
    let library = PresetLibrary::new(&paths.presets_dir);
    let store = ThemeStore::new(&paths.colors_path).with_write_mode(paths.write_mode);

    match cli.command {
        Commands::List => {
            let presets = library.list()?;
            serde_json::to_writer_pretty(&mut *out, &presets).map_err(io::Error::from)?;
            writeln!(out)?;
        }
        Commands::Apply { preset_id, mode } => {
            let applied = preset::apply_preset(&library, &store, &preset_id, &mode)?;
            writeln!(out, "{}", applied.message())?;
        }
        Commands::Render(args) => {
            let theme = store.load_mode(&args.mode)?;
            let language = args.language.or(config.language).unwrap_or_default();
            let rendered = preview::render(&theme, language);
            match args.format {
                OutputFormat::Html => {
                    let options = args
                        .font_family
                        .map(|font_family| HtmlOptions { font_family })
                        .unwrap_or_default();
                    write!(out, "{}", preview::render_html(&rendered, &options))?;
                }
                OutputFormat::Text => write!(out, "{}", preview::render_text(&rendered))?,
            }
        }
        Commands::Modes => {
            let document = store.load()?;
            for mode in document.mode_names() {
                writeln!(out, "{mode}")?;
            }
        }
    }
    Ok(())
}
