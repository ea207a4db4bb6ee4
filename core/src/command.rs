use std::path::PathBuf;

use crate::cancel::CancelFlag;
use crate::tool::{OutputPolicy, ToolDescriptor, ToolId};

/// What a tool handler decided to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Direct invocation, no shell interpretation.
    Argv(Vec<String>),
    /// Pre-escaped line for the host shell; only used when redirection is needed.
    ShellLine(String),
    /// The handler already opened the tool in its own terminal window.
    ExternalLaunch,
    /// Rendered in-process by [`crate::hexdump`].
    InternalHexdump {
        pattern: Option<String>,
        max_lines: usize,
    },
    /// The user backed out while configuring the tool.
    Cancelled,
}

impl Command {
    pub fn argv<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command::Argv(parts.into_iter().map(Into::into).collect())
    }
}

/// Which quoting convention a [`Command::ShellLine`] is composed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlavor {
    Posix,
    Windows,
}

impl ShellFlavor {
    pub fn host() -> Self {
        if cfg!(windows) {
            ShellFlavor::Windows
        } else {
            ShellFlavor::Posix
        }
    }
}

/// One queued entry of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub tool: ToolId,
    pub display_name: String,
    pub command: Command,
    pub policy: OutputPolicy,
}

/// The ordered queue for one run plus its cancellation flag.
///
/// `Cancelled` commands are never enqueued.
#[derive(Debug, Clone)]
pub struct RunSession {
    target: PathBuf,
    jobs: Vec<Job>,
    cancel: CancelFlag,
}

impl RunSession {
    pub fn new(target: impl Into<PathBuf>, cancel: CancelFlag) -> Self {
        Self {
            target: target.into(),
            jobs: Vec::new(),
            cancel,
        }
    }

    /// Queues `command` for `tool`. Returns false when the command was dropped.
    pub fn push(&mut self, tool: &ToolDescriptor, command: Command) -> bool {
        if command == Command::Cancelled {
            tracing::debug!(tool = %tool.id, "configuration abandoned, not queued");
            return false;
        }
        self.jobs.push(Job {
            tool: tool.id,
            display_name: tool.display_name.clone(),
            command,
            policy: tool.id.output_policy(),
        });
        true
    }

    pub fn target(&self) -> &std::path::Path {
        &self.target
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn into_parts(self) -> (PathBuf, Vec<Job>, CancelFlag) {
        (self.target, self.jobs, self.cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{OutputFilter, ToolRegistry};

    #[test]
    fn test_cancelled_is_never_enqueued() {
        let registry = ToolRegistry::default();
        let mut session = RunSession::new("/tmp/x.png", CancelFlag::new());

        assert!(!session.push(registry.get(ToolId::Binwalk), Command::Cancelled));
        assert!(session.push(registry.get(ToolId::Zsteg), Command::argv(["zsteg", "/tmp/x.png"])));
        assert!(session.push(registry.get(ToolId::Hexdump), Command::ExternalLaunch));

        let jobs = session.jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].tool, ToolId::Zsteg);
        assert_eq!(jobs[0].display_name, "Zsteg");
        assert_eq!(jobs[0].policy.filter, OutputFilter::DropTruncatedGuesses);
        assert_eq!(jobs[1].command, Command::ExternalLaunch);
    }
}
