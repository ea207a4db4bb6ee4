use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::MissedTickBehavior;

use crate::cancel::CancelFlag;
use crate::error::RunnerError;

use super::decode::decode_output_bytes;
use super::exit::normalize_exit;

const MIN_POLL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy)]
pub(crate) enum Invocation<'a> {
    Argv(&'a [String]),
    Shell(&'a str),
}

#[derive(Debug)]
pub(crate) enum ProcessOutcome {
    Exited {
        code: i32,
        stdout: String,
        stderr: String,
    },
    Killed,
}

fn build_command(invocation: Invocation<'_>) -> Result<(String, tokio::process::Command), RunnerError> {
    match invocation {
        Invocation::Argv(argv) => {
            let (program, rest) = argv.split_first().ok_or(RunnerError::EmptyCommand)?;
            let mut cmd = tokio::process::Command::new(program);
            cmd.args(rest);
            Ok((program.clone(), cmd))
        }
        Invocation::Shell(line) => Ok(shell_command(line)),
    }
}

#[cfg(unix)]
fn shell_command(line: &str) -> (String, tokio::process::Command) {
    let mut cmd = tokio::process::Command::new("sh");
    cmd.arg("-c").arg(line);
    ("sh".to_string(), cmd)
}

#[cfg(windows)]
fn shell_command(line: &str) -> (String, tokio::process::Command) {
    use std::os::windows::process::CommandExt;

    // cmd.exe does its own parsing; the line is already quoted for it.
    // With /S only the outer pair is stripped, so a quoted executable survives.
    let mut std_cmd = std::process::Command::new("cmd");
    std_cmd.raw_arg(format!("/S /C \"{line}\""));
    ("cmd".to_string(), tokio::process::Command::from(std_cmd))
}

fn pump<R>(mut reader: R, stream: &'static str) -> JoinHandle<Result<Vec<u8>, RunnerError>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .await
            .map_err(|source| RunnerError::StreamIo { stream, source })?;
        Ok(buf)
    })
}

async fn collect(handle: Option<JoinHandle<Result<Vec<u8>, RunnerError>>>) -> Result<String, RunnerError> {
    let Some(handle) = handle else {
        return Ok(String::new());
    };
    let bytes = handle
        .await
        .map_err(|e| RunnerError::Join(e.to_string()))??;
    Ok(decode_output_bytes(&bytes))
}

/// Runs one process to completion, checking `cancel` every `poll`.
///
/// On cancellation the child is killed and its output discarded.
pub(crate) async fn run_process(
    invocation: Invocation<'_>,
    cancel: &CancelFlag,
    poll: Duration,
) -> Result<ProcessOutcome, RunnerError> {
    let (program, mut cmd) = build_command(invocation)?;
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|source| {
        tracing::error!(error.kind = "runner.spawn", program = %program, error.message = %source);
        RunnerError::Spawn {
            program: program.clone(),
            source,
        }
    })?;
    tracing::debug!(program = %program, pid = ?child.id(), "process spawned");

    let out_task = child.stdout.take().map(|s| pump(s, "stdout"));
    let err_task = child.stderr.take().map(|s| pump(s, "stderr"));
    let pumps: Vec<AbortHandle> = [&out_task, &err_task]
        .into_iter()
        .flatten()
        .map(JoinHandle::abort_handle)
        .collect();

    let mut tick = tokio::time::interval(poll.max(MIN_POLL));
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // A background grandchild can hold the pipes open after the child exits,
    // so draining them is cancellable too.
    let finished = {
        let exit = async {
            let status = child.wait().await.map_err(RunnerError::Wait)?;
            let stdout = collect(out_task).await?;
            let stderr = collect(err_task).await?;
            Ok::<_, RunnerError>((status, stdout, stderr))
        };
        tokio::pin!(exit);

        loop {
            tokio::select! {
                res = &mut exit => {
                    break Some(res?);
                }
                _ = tick.tick() => {
                    if cancel.is_cancelled() {
                        break None;
                    }
                }
            }
        }
    };

    let Some((status, stdout, stderr)) = finished else {
        tracing::info!(program = %program, "cancellation requested, killing process");
        if let Err(e) = child.kill().await {
            tracing::debug!(program = %program, error.message = %e, "kill failed");
        }
        for pump in pumps {
            pump.abort();
        }
        return Ok(ProcessOutcome::Killed);
    };

    let code = normalize_exit(status);
    tracing::debug!(program = %program, code, stdout_len = stdout.len(), stderr_len = stderr.len(), "process exited");

    Ok(ProcessOutcome::Exited {
        code,
        stdout,
        stderr,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_captures_streams_separately() {
        let cmd = argv(&["sh", "-c", "echo out; echo err >&2; exit 3"]);
        let outcome = run_process(Invocation::Argv(&cmd), &CancelFlag::new(), Duration::from_millis(10))
            .await
            .unwrap();
        match outcome {
            ProcessOutcome::Exited { code, stdout, stderr } => {
                assert_eq!(code, 3);
                assert_eq!(stdout, "out\n");
                assert_eq!(stderr, "err\n");
            }
            ProcessOutcome::Killed => panic!("unexpected kill"),
        }
    }

    #[tokio::test]
    async fn test_empty_argv_is_rejected() {
        let err = run_process(Invocation::Argv(&[]), &CancelFlag::new(), Duration::from_millis(10))
            .await
            .unwrap_err();
        assert!(matches!(err, RunnerError::EmptyCommand));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let cmd = argv(&["stegsuite-definitely-not-installed"]);
        let err = run_process(Invocation::Argv(&cmd), &CancelFlag::new(), Duration::from_millis(10))
            .await
            .unwrap_err();
        assert!(matches!(err, RunnerError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_preset_cancel_kills_on_first_tick() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let cmd = argv(&["sleep", "5"]);
        let started = std::time::Instant::now();
        let outcome = run_process(Invocation::Argv(&cmd), &cancel, Duration::from_millis(10))
            .await
            .unwrap();
        assert!(matches!(outcome, ProcessOutcome::Killed));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_shell_line_redirects() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("payload.bin");
        let line = format!("printf hidden > '{}'", out.display());
        let outcome = run_process(Invocation::Shell(&line), &CancelFlag::new(), Duration::from_millis(10))
            .await
            .unwrap();
        assert!(matches!(outcome, ProcessOutcome::Exited { code: 0, .. }));
        assert_eq!(std::fs::read_to_string(out).unwrap(), "hidden");
    }
}
