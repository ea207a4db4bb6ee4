use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::cancel::CancelFlag;
use crate::command::{Command, Job, RunSession};
use crate::hexdump::{self, HexdumpOptions};
use crate::log::{separator, Severity};

use super::events::RunnerEvent;
use super::output::success_output;
use super::process::{run_process, ProcessOutcome, Invocation};
use super::types::{JobResult, JobStatus, RunOutcome, RunState};

pub const CHAIN_STOPPED: &str = "[!] CHAIN STOPPED DUE TO ERROR.\n";
pub const PROCESS_KILLED: &str = "[!] Process killed by user.\n";

pub struct RunSessionArgs {
    pub session: RunSession,
    pub poll_interval: Duration,
    pub event_tx: Option<mpsc::UnboundedSender<RunnerEvent>>,
}

struct Emitter {
    tx: Option<mpsc::UnboundedSender<RunnerEvent>>,
}

impl Emitter {
    fn send(&self, event: RunnerEvent) {
        if let Some(tx) = &self.tx {
            // A presenter that went away must not stop the chain.
            let _ = tx.send(event);
        }
    }

    fn log(&self, text: impl Into<String>, severity: Severity) {
        self.send(RunnerEvent::Log {
            text: text.into(),
            severity,
        });
    }
}

enum Step {
    Continue,
    Halt(RunState),
}

/// Executes the queued jobs one at a time.
///
/// Stops at the first failure or when the session's cancel flag is raised.
/// Jobs that were killed or never started produce no [`JobResult`].
pub async fn run_session(args: RunSessionArgs) -> RunOutcome {
    let (target, jobs, cancel) = args.session.into_parts();
    let emitter = Emitter { tx: args.event_tx };
    cancel.clear();

    tracing::info!(target = %target.display(), jobs = jobs.len(), "run started");

    let mut results = Vec::new();
    let mut state = RunState::Completed;

    for job in &jobs {
        if cancel.is_cancelled() {
            state = RunState::Cancelled;
            break;
        }
        match run_job(job, &target, &cancel, args.poll_interval, &emitter, &mut results).await {
            Step::Continue => {}
            Step::Halt(s) => {
                state = s;
                break;
            }
        }
    }

    tracing::info!(state = ?state, executed = results.len(), "run finished");
    emitter.send(RunnerEvent::RunComplete { state });
    RunOutcome { state, results }
}

async fn run_job(
    job: &Job,
    target: &Path,
    cancel: &CancelFlag,
    poll: Duration,
    emitter: &Emitter,
    results: &mut Vec<JobResult>,
) -> Step {
    let invocation = match &job.command {
        // Handled by the builder already; nothing to wait for.
        Command::ExternalLaunch => {
            tracing::debug!(tool = %job.tool, "external launch, skipping");
            return Step::Continue;
        }
        Command::Cancelled => return Step::Continue,
        Command::InternalHexdump { pattern, max_lines } => {
            let opts = HexdumpOptions::new(pattern.clone(), *max_lines);
            return run_hexdump(job, target.to_path_buf(), opts, cancel, emitter, results).await;
        }
        Command::Argv(argv) => Invocation::Argv(argv),
        Command::ShellLine(line) => Invocation::Shell(line),
    };

    announce(job, emitter);

    let outcome = match run_process(invocation, cancel, poll).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let msg = e.to_string();
            emitter.log(format!("[!] Execution Error: {msg}\n"), Severity::Error);
            finish(
                emitter,
                results,
                JobResult {
                    tool: job.tool,
                    status: JobStatus::ExecutionError(msg),
                    stdout: String::new(),
                    stderr: String::new(),
                },
            );
            return Step::Halt(RunState::Failed);
        }
    };

    match outcome {
        ProcessOutcome::Killed => {
            emitter.log(PROCESS_KILLED, Severity::Error);
            Step::Halt(RunState::Cancelled)
        }
        ProcessOutcome::Exited {
            code: 0,
            stdout,
            stderr,
        } => {
            emitter.log(success_output(&job.policy, &stdout), Severity::Normal);
            emitter.log(separator(), Severity::Normal);
            finish(
                emitter,
                results,
                JobResult {
                    tool: job.tool,
                    status: JobStatus::Success,
                    stdout,
                    stderr,
                },
            );
            Step::Continue
        }
        ProcessOutcome::Exited {
            code,
            stdout,
            stderr,
        } => {
            tracing::warn!(tool = %job.tool, code, "tool exited with non-zero status");
            emitter.log(format!("[-] Error Code {code}:\n"), Severity::Error);
            emitter.log(stderr.clone(), Severity::Error);
            if job.policy.show_stdout_on_failure && !stdout.is_empty() {
                emitter.log(stdout.clone(), Severity::Normal);
            }
            emitter.log(CHAIN_STOPPED, Severity::Error);
            finish(
                emitter,
                results,
                JobResult {
                    tool: job.tool,
                    status: JobStatus::NonZero(code),
                    stdout,
                    stderr,
                },
            );
            Step::Halt(RunState::Failed)
        }
    }
}

async fn run_hexdump(
    job: &Job,
    target: PathBuf,
    opts: HexdumpOptions,
    cancel: &CancelFlag,
    emitter: &Emitter,
    results: &mut Vec<JobResult>,
) -> Step {
    announce(job, emitter);

    let flag = cancel.clone();
    let joined =
        tokio::task::spawn_blocking(move || hexdump::dump_file(&target, &opts, &flag)).await;

    match joined {
        Ok(text) => {
            // I/O failures come back as a single error line and do not halt the chain.
            emitter.log(text.clone(), Severity::Normal);
            emitter.log(separator(), Severity::Normal);
            finish(
                emitter,
                results,
                JobResult {
                    tool: job.tool,
                    status: JobStatus::Success,
                    stdout: text,
                    stderr: String::new(),
                },
            );
            Step::Continue
        }
        Err(e) => {
            let msg = e.to_string();
            emitter.log(format!("[!] Execution Error: {msg}\n"), Severity::Error);
            finish(
                emitter,
                results,
                JobResult {
                    tool: job.tool,
                    status: JobStatus::ExecutionError(msg),
                    stdout: String::new(),
                    stderr: String::new(),
                },
            );
            Step::Halt(RunState::Failed)
        }
    }
}

fn announce(job: &Job, emitter: &Emitter) {
    tracing::info!(tool = %job.tool, "job started");
    emitter.send(RunnerEvent::JobStarted { tool: job.tool });
    emitter.log(
        format!("\n[~] Running: {}...\n", job.display_name),
        Severity::Info,
    );
}

fn finish(emitter: &Emitter, results: &mut Vec<JobResult>, result: JobResult) {
    emitter.send(RunnerEvent::JobFinished(result.clone()));
    results.push(result);
}
