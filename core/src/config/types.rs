use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub ui: UiConfig,
    pub runner: RunnerConfig,

    /// Executable overrides keyed by internal tool name (`exiftool` and `file` included).
    pub tool_paths: BTreeMap<String, String>,

    /// Help text keyed by internal tool name.
    pub tool_help: BTreeMap<String, String>,
}

impl AppConfig {
    pub fn executable_for(&self, name: &str) -> String {
        self.tool_paths
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    pub theme: String,
    pub color_theme: String,
    pub default_dir: PathBuf,
    pub font_size: u32,
}

const DEFAULT_THEME: &str = "dark";
const DEFAULT_COLOR_THEME: &str = "blue";
const DEFAULT_FONT_SIZE: u32 = 13;
const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            color_theme: DEFAULT_COLOR_THEME.to_string(),
            default_dir: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// How often a running tool is checked for exit or cancellation.
    pub poll_interval_ms: u64,
}

impl RunnerConfig {
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}
