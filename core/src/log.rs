//! Append-only output log shown to the user.
//!
//! Every segment carries a [`Severity`]. Callers that pass [`Severity::Normal`] get
//! the severity inferred from the message prefix convention (`[+]`, `[-]`, `[!]`, `[~]`).

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ExportError;

pub const SEPARATOR_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
    Normal,
}

/// Infers a severity from the message text.
pub fn classify(message: &str) -> Severity {
    if message.starts_with("[+]") {
        Severity::Success
    } else if message.starts_with("[-]") || message.contains("Error") {
        Severity::Error
    } else if message.starts_with("[!]") {
        Severity::Warning
    } else if message.starts_with("[~]") || message.contains("Running") {
        Severity::Info
    } else {
        Severity::Normal
    }
}

/// Keeps an explicit severity, infers one for `Normal`.
pub fn resolve(message: &str, requested: Severity) -> Severity {
    match requested {
        Severity::Normal => classify(message),
        other => other,
    }
}

pub fn separator() -> String {
    let mut s = "-".repeat(SEPARATOR_WIDTH);
    s.push('\n');
    s
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogSegment {
    pub text: String,
    pub severity: Severity,
}

impl LogSegment {
    pub fn new(text: impl Into<String>, requested: Severity) -> Self {
        let text = text.into();
        let severity = resolve(&text, requested);
        Self { text, severity }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Normal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing to save; no file was written.
    Empty,
    Written { path: PathBuf, bytes: usize },
}

#[derive(Debug, Default, Clone)]
pub struct LogBuffer {
    segments: Vec<LogSegment>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: LogSegment) {
        self.segments.push(segment);
    }

    pub fn append(&mut self, text: impl Into<String>, requested: Severity) {
        self.push(LogSegment::new(text, requested));
    }

    pub fn segments(&self) -> &[LogSegment] {
        &self.segments
    }

    pub fn content(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.content().trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Writes the trimmed log to `path`. An empty log writes nothing.
    pub async fn export(&self, path: &Path) -> Result<ExportOutcome, ExportError> {
        let content = self.content();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(ExportOutcome::Empty);
        }

        tokio::fs::write(path, trimmed.as_bytes())
            .await
            .map_err(|source| ExportError::Io {
                path: path.display().to_string(),
                source,
            })?;

        tracing::info!(path = %path.display(), bytes = trimmed.len(), "log exported");
        Ok(ExportOutcome::Written {
            path: path.to_path_buf(),
            bytes: trimmed.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_prefixes() {
        assert_eq!(classify("[+] Found: zsteg\n"), Severity::Success);
        assert_eq!(classify("[-] Missing: jsteg\n"), Severity::Error);
        assert_eq!(classify("Error reading file: gone"), Severity::Error);
        assert_eq!(classify("[!] Execution Error: boom\n"), Severity::Error);
        assert_eq!(classify("[!] Invalid drop\n"), Severity::Warning);
        assert_eq!(classify("[~] scanning\n"), Severity::Info);
        assert_eq!(classify("\n[~] Running: Zsteg...\n"), Severity::Info);
        assert_eq!(classify("plain tool output"), Severity::Normal);
    }

    #[test]
    fn test_explicit_severity_is_kept() {
        let seg = LogSegment::new("[+] looks like success", Severity::Error);
        assert_eq!(seg.severity, Severity::Error);
        let seg = LogSegment::normal("[+] Done (No Output).\n");
        assert_eq!(seg.severity, Severity::Success);
    }

    #[test]
    fn test_content_is_verbatim() {
        let mut log = LogBuffer::new();
        log.append("a\n", Severity::Normal);
        log.append("[-] b\n", Severity::Normal);
        assert_eq!(log.content(), "a\n[-] b\n");
        log.clear();
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_export_empty_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let mut log = LogBuffer::new();
        log.append("  \n\n", Severity::Normal);

        assert_eq!(log.export(&path).await.unwrap(), ExportOutcome::Empty);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_export_writes_trimmed_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let mut log = LogBuffer::new();
        log.append("\n[~] Running: Binwalk...\n", Severity::Info);
        log.append("DECIMAL  HEXADECIMAL\n", Severity::Normal);

        let outcome = log.export(&path).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[~] Running: Binwalk...\nDECIMAL  HEXADECIMAL");
        assert_eq!(
            outcome,
            ExportOutcome::Written {
                path: path.clone(),
                bytes: written.len()
            }
        );
    }
}
