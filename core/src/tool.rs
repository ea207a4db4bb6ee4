use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::AppConfig;
use crate::error::UnknownTool;

/// The closed set of external utilities the console can chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolId {
    Binwalk,
    Zsteg,
    Pngcheck,
    Steghide,
    Stegseek,
    Jsteg,
    Stegsnow,
    Hexdump,
    Hashcat,
}

impl ToolId {
    pub const ALL: [ToolId; 9] = [
        ToolId::Binwalk,
        ToolId::Zsteg,
        ToolId::Pngcheck,
        ToolId::Steghide,
        ToolId::Stegseek,
        ToolId::Jsteg,
        ToolId::Stegsnow,
        ToolId::Hexdump,
        ToolId::Hashcat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolId::Binwalk => "binwalk",
            ToolId::Zsteg => "zsteg",
            ToolId::Pngcheck => "pngcheck",
            ToolId::Steghide => "steghide",
            ToolId::Stegseek => "stegseek",
            ToolId::Jsteg => "jsteg",
            ToolId::Stegsnow => "stegsnow",
            ToolId::Hexdump => "hexdump",
            ToolId::Hashcat => "hashcat",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ToolId::Binwalk => "Binwalk",
            ToolId::Zsteg => "Zsteg",
            ToolId::Pngcheck => "Pngcheck",
            ToolId::Steghide => "Steghide",
            ToolId::Stegseek => "Stegseek",
            ToolId::Jsteg => "Jsteg",
            ToolId::Stegsnow => "Stegsnow",
            ToolId::Hexdump => "Hexdump",
            ToolId::Hashcat => "Hashcat",
        }
    }

    /// How the runner treats this tool's captured output.
    pub fn output_policy(self) -> OutputPolicy {
        match self {
            ToolId::Zsteg => OutputPolicy {
                filter: OutputFilter::DropTruncatedGuesses,
                show_stdout_on_failure: false,
            },
            // cracked hashes land on stdout even when hashcat exits non-zero
            ToolId::Hashcat => OutputPolicy {
                filter: OutputFilter::Verbatim,
                show_stdout_on_failure: true,
            },
            _ => OutputPolicy::default(),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolId {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ToolId::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTool(wanted.to_string()))
    }
}

/// Post-processing applied to a successful tool's stdout before it is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFilter {
    #[default]
    Verbatim,
    /// zsteg prints low-confidence guesses truncated with a trailing `..`.
    DropTruncatedGuesses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputPolicy {
    pub filter: OutputFilter,
    pub show_stdout_on_failure: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub id: ToolId,
    pub display_name: String,
    /// Executable name or path; the internal name unless overridden in config.
    pub executable: String,
    pub help: Option<String>,
}

/// One descriptor per [`ToolId`], fixed after startup.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    pub fn from_config(cfg: &AppConfig) -> Self {
        let tools = ToolId::ALL
            .into_iter()
            .map(|id| ToolDescriptor {
                id,
                display_name: id.display_name().to_string(),
                executable: cfg.executable_for(id.as_str()),
                help: cfg.tool_help.get(id.as_str()).cloned(),
            })
            .collect();
        Self { tools }
    }

    pub fn get(&self, id: ToolId) -> &ToolDescriptor {
        &self.tools[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}
