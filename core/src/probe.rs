//! Startup check for which tools can actually be launched.

use std::collections::BTreeMap;
use std::path::Path;

use crate::log::separator;
use crate::tool::{ToolId, ToolRegistry};

/// True when `executable` is on the search path or names an existing file.
pub fn is_resolvable(executable: &str) -> bool {
    if executable.trim().is_empty() {
        return false;
    }
    which::which(executable).is_ok() || Path::new(executable).exists()
}

/// Result of one probe. Fixed for the rest of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    tools: BTreeMap<ToolId, ProbeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ProbeEntry {
    available: bool,
    executable: String,
}

impl Availability {
    pub fn is_available(&self, id: ToolId) -> bool {
        self.tools.get(&id).is_some_and(|e| e.available)
    }

    pub fn available(&self) -> impl Iterator<Item = ToolId> + '_ {
        self.tools
            .iter()
            .filter(|(_, e)| e.available)
            .map(|(id, _)| *id)
    }

    pub fn missing(&self) -> impl Iterator<Item = ToolId> + '_ {
        self.tools
            .iter()
            .filter(|(_, e)| !e.available)
            .map(|(id, _)| *id)
    }

    pub fn as_map(&self) -> BTreeMap<ToolId, bool> {
        self.tools.iter().map(|(id, e)| (*id, e.available)).collect()
    }

    /// User-facing probe summary, one log line per entry.
    pub fn report(&self) -> Vec<String> {
        let mut lines = vec![">>> [SYSTEM CHECK] Verifying tools...\n".to_string()];
        for (id, entry) in &self.tools {
            if entry.available {
                lines.push(format!("[+] Found: {id}\n"));
            } else {
                lines.push(format!("[-] Missing: {id} (Command: {})\n", entry.executable));
            }
        }
        lines.push(separator());
        lines
    }

    #[doc(hidden)]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (ToolId, bool)>) -> Self {
        let tools = pairs
            .into_iter()
            .map(|(id, available)| {
                (
                    id,
                    ProbeEntry {
                        available,
                        executable: id.as_str().to_string(),
                    },
                )
            })
            .collect();
        Self { tools }
    }
}

pub fn probe(registry: &ToolRegistry) -> Availability {
    probe_with(registry, is_resolvable)
}

/// Probe with a custom resolver.
pub fn probe_with(registry: &ToolRegistry, resolve: impl Fn(&str) -> bool) -> Availability {
    let mut tools = BTreeMap::new();
    for tool in registry.iter() {
        let available = resolve(&tool.executable);
        if available {
            tracing::debug!(tool = %tool.id, executable = %tool.executable, "tool found");
        } else {
            tracing::warn!(tool = %tool.id, executable = %tool.executable, "tool missing");
        }
        tools.insert(
            tool.id,
            ProbeEntry {
                available,
                executable: tool.executable.clone(),
            },
        );
    }
    Availability { tools }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_literal_path_is_resolvable() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(is_resolvable(file.path().to_str().unwrap()));
        assert!(!is_resolvable("/definitely/not/here/zsteg"));
        assert!(!is_resolvable("  "));
    }

    #[cfg(unix)]
    #[test]
    fn test_search_path_is_resolvable() {
        assert!(is_resolvable("sh"));
    }

    #[test]
    fn test_report_lines() {
        let mut cfg = AppConfig::default();
        cfg.tool_paths
            .insert("jsteg".to_string(), "/opt/jsteg/bin/jsteg".to_string());
        let registry = ToolRegistry::from_config(&cfg);

        let availability = probe_with(&registry, |exe| exe != "/opt/jsteg/bin/jsteg");
        assert!(!availability.is_available(ToolId::Jsteg));
        assert_eq!(availability.missing().collect::<Vec<_>>(), vec![ToolId::Jsteg]);
        assert_eq!(availability.available().count(), 8);

        let report = availability.report();
        assert_eq!(report[0], ">>> [SYSTEM CHECK] Verifying tools...\n");
        assert_eq!(report[1], "[+] Found: binwalk\n");
        assert!(report.contains(&"[-] Missing: jsteg (Command: /opt/jsteg/bin/jsteg)\n".to_string()));
        assert_eq!(report.last().unwrap(), &separator());
        assert_eq!(report.len(), 11);
    }
}
