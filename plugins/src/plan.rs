use std::path::Path;

use stegsuite_core::api::{
    BuildContext, CancelFlag, ConfigProvider, LogSegment, RunSession, Severity, ShellFlavor,
    TerminalLauncher, ToolId, ToolRegistry,
};

use crate::factory::build_handler;

pub const NOTHING_TO_RUN: &str = "[!] No actions selected or cancelled by user.\n";

pub struct PlanArgs<'a> {
    pub registry: &'a ToolRegistry,
    pub target: &'a Path,
    pub tools: &'a [ToolId],
    pub cancel: CancelFlag,
    pub shell: ShellFlavor,
    pub launcher: &'a dyn TerminalLauncher,
}

/// The queued run plus anything worth telling the user about how it was built.
#[derive(Debug)]
pub struct PlanOutcome {
    pub session: RunSession,
    pub notes: Vec<LogSegment>,
}

/// Builds one command per selected tool, in selection order.
///
/// A handler error skips only that tool. An empty session gets a
/// [`NOTHING_TO_RUN`] note.
pub fn plan_session(args: PlanArgs<'_>, prompts: &mut dyn ConfigProvider) -> PlanOutcome {
    let mut session = RunSession::new(args.target, args.cancel);
    let mut notes = Vec::new();

    for &id in args.tools {
        let tool = args.registry.get(id);
        let ctx = BuildContext {
            tool,
            target: args.target,
            shell: args.shell,
            launcher: args.launcher,
        };
        match build_handler(id).build(&ctx, prompts) {
            Ok(command) => {
                session.push(tool, command);
            }
            Err(e) => {
                tracing::warn!(tool = %id, error.message = %e, "failed to prepare tool");
                notes.push(LogSegment::new(
                    format!("[!] Error preparing {id}: {e}\n"),
                    Severity::Error,
                ));
            }
        }
    }

    if session.is_empty() {
        notes.push(LogSegment::new(NOTHING_TO_RUN, Severity::Warning));
    }
    tracing::debug!(queued = session.jobs().len(), "plan complete");
    PlanOutcome { session, notes }
}
