use serde::Serialize;

use crate::tool::ToolId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum JobStatus {
    Success,
    NonZero(i32),
    ExecutionError(String),
}

/// One per executed command, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobResult {
    pub tool: ToolId,
    pub status: JobStatus,
    pub stdout: String,
    pub stderr: String,
}

impl JobResult {
    pub fn is_success(&self) -> bool {
        self.status == JobStatus::Success
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Completed,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub state: RunState,
    pub results: Vec<JobResult>,
}
