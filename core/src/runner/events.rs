use crate::log::Severity;
use crate::tool::ToolId;

use super::types::{JobResult, RunState};

/// Events emitted by the run worker.
///
/// The worker never prints; the presenter drains these and owns rendering, so
/// `core` stays independent of any terminal code.
#[derive(Debug, Clone)]
pub enum RunnerEvent {
    Log { text: String, severity: Severity },
    JobStarted { tool: ToolId },
    JobFinished(JobResult),
    RunComplete { state: RunState },
}
