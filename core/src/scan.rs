//! Pre-scan of a freshly selected target: file type, metadata, tool suggestions.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;

use crate::config::AppConfig;
use crate::error::ScanError;
use crate::log::{LogSegment, Severity};
use crate::probe::{is_resolvable, Availability};
use crate::runner::decode_output_bytes;
use crate::tool::ToolId;

pub const FILE_TIMEOUT: Duration = Duration::from_secs(10);
pub const EXIFTOOL_TIMEOUT: Duration = Duration::from_secs(15);

const SNIFF_BYTES: u64 = 8192;

/// Tools worth trying per lower-cased extension. Entries that are not
/// chainable tools (`exiftool`, `gunzip`) are dropped by [`suggest_tools`].
const COMPATIBILITY: &[(&str, &[&str])] = &[
    ("png", &["binwalk", "zsteg", "pngcheck", "steghide", "stegseek", "hexdump", "exiftool"]),
    ("jpeg", &["binwalk", "steghide", "stegseek", "jsteg", "hexdump", "hashcat", "exiftool"]),
    ("jpg", &["binwalk", "steghide", "stegseek", "jsteg", "hexdump", "hashcat", "exiftool"]),
    ("txt", &["stegsnow", "hexdump", "hashcat", "exiftool"]),
    ("zip", &["binwalk", "hexdump", "gunzip", "exiftool"]),
    ("hash", &["hashcat", "hexdump", "exiftool"]),
];

/// Helper executables used by the pre-scan, resolved from config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanHelpers {
    pub file: String,
    pub exiftool: String,
}

impl ScanHelpers {
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            file: cfg.executable_for("file"),
            exiftool: cfg.executable_for("exiftool"),
        }
    }
}

impl Default for ScanHelpers {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Identifies `target` and dumps its metadata. Never fails; problems become log lines.
pub async fn pre_scan(target: &Path, helpers: &ScanHelpers) -> Vec<LogSegment> {
    let mut log = vec![LogSegment::new(
        "\n[!] Identifying target file type...\n",
        Severity::Warning,
    )];

    let identified = if is_resolvable(&helpers.file) {
        run_helper(&helpers.file, target, FILE_TIMEOUT)
            .await
            .map(|out| format!("{out}\n"))
    } else {
        sniff_mime(target)
            .await
            .map(|mime| format!("Detected (MIME): {}\n", mime.unwrap_or("Unknown")))
    };
    match identified {
        Ok(text) => log.push(LogSegment::normal(text)),
        Err(e) => log.push(LogSegment::new(
            format!("Type check error: {e}\n"),
            Severity::Error,
        )),
    }

    if is_resolvable(&helpers.exiftool) {
        log.push(LogSegment::new(
            format!("{0} EXIF METADATA {0}\n", "-".repeat(15)),
            Severity::Info,
        ));
        match run_helper(&helpers.exiftool, target, EXIFTOOL_TIMEOUT).await {
            Ok(out) => log.push(LogSegment::normal(format!("{out}\n"))),
            Err(e) => log.push(LogSegment::new(
                format!("[!] ExifTool error: {e}\n"),
                Severity::Error,
            )),
        }
    } else {
        log.push(LogSegment::new(
            "[*] ExifTool not installed. Skipping metadata.\n",
            Severity::Warning,
        ));
    }

    log.push(LogSegment::normal(format!("{}\n", "-".repeat(50))));
    log
}

/// Runs `program <target>` with stderr folded into the output.
async fn run_helper(program: &str, target: &Path, limit: Duration) -> Result<String, ScanError> {
    let mut cmd = tokio::process::Command::new(program);
    cmd.arg(target)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    tracing::debug!(program, target = %target.display(), "running scan helper");
    let output = match tokio::time::timeout(limit, cmd.output()).await {
        Ok(res) => res.map_err(|source| ScanError::Spawn {
            program: program.to_string(),
            source,
        })?,
        Err(_) => {
            tracing::warn!(program, secs = limit.as_secs(), "scan helper timed out");
            return Err(ScanError::Timeout {
                program: program.to_string(),
                secs: limit.as_secs(),
            });
        }
    };

    if !output.status.success() {
        return Err(ScanError::Status {
            program: program.to_string(),
            code: crate::runner::normalize_exit(output.status),
        });
    }

    let mut text = decode_output_bytes(&output.stdout);
    text.push_str(&decode_output_bytes(&output.stderr));
    Ok(text)
}

/// Magic-byte detection for hosts without `file`.
pub async fn sniff_mime(target: &Path) -> Result<Option<&'static str>, ScanError> {
    let file = tokio::fs::File::open(target).await.map_err(ScanError::Sniff)?;
    let mut head = Vec::new();
    file.take(SNIFF_BYTES)
        .read_to_end(&mut head)
        .await
        .map_err(ScanError::Sniff)?;

    let kind = infer::get(&head).map(|k| k.mime_type());
    tracing::debug!(target = %target.display(), mime = ?kind, "sniffed file type");
    Ok(kind)
}

/// Available tools suggested for `target`'s extension, in table order.
pub fn suggest_tools(target: &Path, availability: &Availability) -> Vec<ToolId> {
    let Some(ext) = target
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
    else {
        return Vec::new();
    };

    COMPATIBILITY
        .iter()
        .find(|(key, _)| *key == ext)
        .map(|(_, names)| {
            names
                .iter()
                .filter_map(|name| name.parse::<ToolId>().ok())
                .filter(|id| availability.is_available(*id))
                .collect()
        })
        .unwrap_or_default()
}
