//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `stegsuite_core::api` instead of reaching into internal modules.

pub use crate::builder::{BuildContext, PlanError, TerminalLauncher, ToolHandler};
pub use crate::cancel::CancelFlag;
pub use crate::command::{Command, Job, RunSession, ShellFlavor};
pub use crate::config::{load_default, load_from_dir, AppConfig, RunnerConfig, UiConfig};
pub use crate::error::{BuildError, ConfigError, ExportError, RunnerError, ScanError, UnknownTool};
pub use crate::hexdump::{dump, dump_file, render_row, HexRows, HexdumpOptions, DEFAULT_MAX_LINES};
pub use crate::log::{classify, separator, ExportOutcome, LogBuffer, LogSegment, Severity};
pub use crate::probe::{is_resolvable, probe, Availability};
pub use crate::prompt::{Abandoned, Answer, ConfigProvider, Decision, ScriptedProvider};
pub use crate::runner::{
    run_session, JobResult, JobStatus, RunOutcome, RunSessionArgs, RunState, RunnerEvent,
};
pub use crate::scan::{pre_scan, suggest_tools, ScanHelpers};
pub use crate::tool::{OutputFilter, OutputPolicy, ToolDescriptor, ToolId, ToolRegistry};
