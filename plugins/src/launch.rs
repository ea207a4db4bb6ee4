use std::io;
use std::process::Stdio;

use stegsuite_core::api::TerminalLauncher;

#[cfg(unix)]
use crate::quote::posix_quote;

/// Opens shell lines in a new window of the host's terminal emulator.
#[derive(Debug, Clone, Default)]
pub struct HostTerminal;

impl HostTerminal {
    pub fn new() -> Self {
        Self
    }
}

impl TerminalLauncher for HostTerminal {
    #[cfg(unix)]
    fn launch(&self, shell_line: &str) -> io::Result<()> {
        let child = std::process::Command::new("x-terminal-emulator")
            .arg("-e")
            .arg(format!("sh -c {}", posix_quote(shell_line)))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::info!(pid = child.id(), "external terminal launched");
        Ok(())
    }

    #[cfg(windows)]
    fn launch(&self, shell_line: &str) -> io::Result<()> {
        use std::os::windows::process::CommandExt;

        let child = std::process::Command::new("cmd")
            .arg("/C")
            .raw_arg(format!("start cmd /k \"{shell_line}\""))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::info!(pid = child.id(), "external terminal launched");
        Ok(())
    }
}
