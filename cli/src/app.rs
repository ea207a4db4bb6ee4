use std::io;
use std::path::{Path, PathBuf};

use stegsuite_core::api::{self as core_api, AppConfig, ToolRegistry};

use crate::commands::cli::{Args, StreamFormat};
use crate::error::CliError;
use crate::render::{Palette, Renderer};

/// Everything loaded once at startup and shared by the subcommands.
pub struct AppContext {
    pub config: AppConfig,
    pub registry: ToolRegistry,
    pub format: StreamFormat,
    pub palette: Palette,
}

impl AppContext {
    pub fn load(args: &Args) -> Self {
        let config = match &args.config_dir {
            Some(dir) => core_api::load_from_dir(dir),
            None => core_api::load_default(),
        };
        let registry = ToolRegistry::from_config(&config);

        let color = !args.no_color
            && args.stream_format == StreamFormat::Text
            && atty::is(atty::Stream::Stdout);
        let palette = if color {
            Palette::for_theme(&config.ui.theme)
        } else {
            Palette::mono()
        };
        tracing::debug!(theme = %config.ui.theme, color, "app context loaded");

        Self {
            config,
            registry,
            format: args.stream_format,
            palette,
        }
    }

    pub fn renderer(&self) -> Renderer<io::Stdout> {
        Renderer::new(io::stdout(), self.format, self.palette)
    }
}

/// Resolves a user-given target; relative paths are taken from the cwd.
pub fn validate_target(path: &Path) -> Result<PathBuf, CliError> {
    if path.as_os_str().is_empty() {
        return Err(CliError::Command("Please load a target file first!".into()));
    }
    let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
    if !expanded.exists() {
        return Err(CliError::Command("File does not exist!".into()));
    }
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_target() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(validate_target(file.path()).unwrap(), file.path());

        let err = validate_target(Path::new("")).unwrap_err();
        assert_eq!(err.to_string(), "Please load a target file first!");
        let err = validate_target(Path::new("/definitely/missing.png")).unwrap_err();
        assert_eq!(err.to_string(), "File does not exist!");
    }
}
