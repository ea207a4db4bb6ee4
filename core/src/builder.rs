//! Seams for per-tool command builders.

use std::path::Path;

use crate::command::{Command, ShellFlavor};
use crate::error::BuildError;
use crate::prompt::{Abandoned, ConfigProvider};
use crate::tool::{ToolDescriptor, ToolId};

/// Opens a shell line in a new, detached terminal window.
pub trait TerminalLauncher: Send + Sync {
    fn launch(&self, shell_line: &str) -> std::io::Result<()>;
}

pub struct BuildContext<'a> {
    pub tool: &'a ToolDescriptor,
    pub target: &'a Path,
    pub shell: ShellFlavor,
    pub launcher: &'a dyn TerminalLauncher,
}

impl BuildContext<'_> {
    pub fn exe(&self) -> &str {
        &self.tool.executable
    }

    pub fn target_arg(&self) -> String {
        self.target.to_string_lossy().into_owned()
    }
}

#[derive(Debug)]
pub enum PlanError {
    Abandoned,
    Build(BuildError),
}

impl From<Abandoned> for PlanError {
    fn from(_: Abandoned) -> Self {
        PlanError::Abandoned
    }
}

impl From<BuildError> for PlanError {
    fn from(e: BuildError) -> Self {
        PlanError::Build(e)
    }
}

pub trait ToolHandler: Send + Sync {
    fn tool(&self) -> ToolId;

    /// Asks whatever the tool needs and returns the command to queue.
    fn plan(
        &self,
        ctx: &BuildContext<'_>,
        prompts: &mut dyn ConfigProvider,
    ) -> Result<Command, PlanError>;

    /// Like [`ToolHandler::plan`], but abandonment becomes [`Command::Cancelled`].
    fn build(
        &self,
        ctx: &BuildContext<'_>,
        prompts: &mut dyn ConfigProvider,
    ) -> Result<Command, BuildError> {
        match self.plan(ctx, prompts) {
            Ok(cmd) => Ok(cmd),
            Err(PlanError::Abandoned) => Ok(Command::Cancelled),
            Err(PlanError::Build(e)) => Err(e),
        }
    }
}
