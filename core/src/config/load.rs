use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::types::AppConfig;

pub const SETTINGS_FILE: &str = "config.txt";
pub const TOOL_PATHS_FILE: &str = "config_application.txt";
pub const TOOL_HELP_FILE: &str = "tooltips.txt";

/// Parses `key=value` lines. Lines without `=` or starting with `#` are skipped.
pub fn parse_key_values(text: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        out.insert(key.to_string(), value.trim().to_string());
    }
    out
}

/// Reads one key=value file. A missing file yields an empty map.
pub fn read_key_values(path: &Path) -> Result<BTreeMap<String, String>, ConfigError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_key_values(&text))
}

pub fn load_default() -> AppConfig {
    let dir = std::env::var("STEGSUITE_CONFIG_DIR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    load_from_dir(&dir)
}

/// Loads the three config files from `dir`, falling back to defaults for anything
/// absent, unreadable or invalid.
pub fn load_from_dir(dir: &Path) -> AppConfig {
    let mut cfg = AppConfig::default();

    apply_settings(&mut cfg, &read_or_warn(&dir.join(SETTINGS_FILE)));

    cfg.tool_paths = read_or_warn(&dir.join(TOOL_PATHS_FILE))
        .into_iter()
        .map(|(k, v)| (k, expand(&v)))
        .collect();
    cfg.tool_help = read_or_warn(&dir.join(TOOL_HELP_FILE));

    if let Ok(v) = std::env::var("STEGSUITE_THEME") {
        if !v.trim().is_empty() {
            cfg.ui.theme = v.trim().to_string();
        }
    }
    if let Ok(v) = std::env::var("STEGSUITE_DEFAULT_DIR") {
        if !v.trim().is_empty() {
            cfg.ui.default_dir = PathBuf::from(expand(v.trim()));
        }
    }

    tracing::debug!(
        dir = %dir.display(),
        theme = %cfg.ui.theme,
        tool_overrides = cfg.tool_paths.len(),
        "config loaded"
    );
    cfg
}

fn read_or_warn(path: &Path) -> BTreeMap<String, String> {
    match read_key_values(path) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config file");
            BTreeMap::new()
        }
    }
}

fn apply_settings(cfg: &mut AppConfig, settings: &BTreeMap<String, String>) {
    if let Some(v) = settings.get("theme") {
        cfg.ui.theme = v.clone();
    }
    if let Some(v) = settings.get("color_theme") {
        cfg.ui.color_theme = v.clone();
    }
    if let Some(v) = settings.get("default_dir") {
        cfg.ui.default_dir = PathBuf::from(expand(v));
    }
    if let Some(v) = settings.get("font_size") {
        match parse_positive("font_size", v) {
            Ok(n) => cfg.ui.font_size = n as u32,
            Err(e) => tracing::warn!(error = %e, "using default font size"),
        }
    }
    if let Some(v) = settings.get("poll_interval_ms") {
        match parse_positive("poll_interval_ms", v) {
            Ok(n) => cfg.runner.poll_interval_ms = n,
            Err(e) => tracing::warn!(error = %e, "using default poll interval"),
        }
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 && n <= u32::MAX as u64 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn expand(value: &str) -> String {
    shellexpand::full(value)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| shellexpand::tilde(value).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_skips_comments_and_malformed_lines() {
        let text = "\
# comment line
theme = light
   # indented comment = still a comment
no equals sign here
default_dir=/srv/ctf
=orphan value
url = http://host/?a=b
";
        let map = parse_key_values(text);
        assert_eq!(map.len(), 3);
        assert_eq!(map["theme"], "light");
        assert_eq!(map["default_dir"], "/srv/ctf");
        assert_eq!(map["url"], "http://host/?a=b");
    }

    #[test]
    fn test_missing_dir_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_from_dir(&dir.path().join("nope"));
        assert_eq!(cfg.ui.font_size, 13);
        assert_eq!(cfg.ui.color_theme, "blue");
        assert_eq!(cfg.runner.poll_interval_ms, 100);
        assert!(cfg.tool_paths.is_empty());
    }

    #[test]
    fn test_load_all_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            "font_size=16\ncolor_theme=green\npoll_interval_ms=25\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join(TOOL_PATHS_FILE),
            "zsteg=/usr/local/bin/zsteg\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join(TOOL_HELP_FILE),
            "binwalk=Scans for embedded files\n",
        )
        .unwrap();

        let cfg = load_from_dir(dir.path());
        assert_eq!(cfg.ui.font_size, 16);
        assert_eq!(cfg.ui.color_theme, "green");
        assert_eq!(cfg.runner.poll_interval_ms, 25);
        assert_eq!(cfg.executable_for("zsteg"), "/usr/local/bin/zsteg");
        assert_eq!(cfg.executable_for("binwalk"), "binwalk");
        assert_eq!(cfg.tool_help["binwalk"], "Scans for embedded files");
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            "font_size=huge\npoll_interval_ms=0\n",
        )
        .unwrap();

        let cfg = load_from_dir(dir.path());
        assert_eq!(cfg.ui.font_size, 13);
        assert_eq!(cfg.runner.poll_interval_ms, 100);
    }
}
