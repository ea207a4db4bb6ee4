use std::io::{self, Write};
use std::path::Path;

use stegsuite_core::api::{
    probe, run_session, suggest_tools, Availability, CancelFlag, ExportOutcome, RunSessionArgs,
    RunState, RunnerEvent, Severity, ShellFlavor, ToolId,
};
use stegsuite_plugins::{plan_session, HostTerminal, PlanArgs};
use tokio::sync::mpsc;

use crate::app::{validate_target, AppContext};
use crate::commands::cli::RunArgs;
use crate::commands::scan::{report_suggestions, scan_target};
use crate::error::CliError;
use crate::prompt::TerminalPrompter;
use crate::render::Renderer;

pub const STOP_REQUESTED: &str = "\n[!] STOP REQUESTED... Terminating processes.\n";

pub async fn handle_run(args: RunArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let target = validate_target(&args.file)?;
    let requested = args
        .tools
        .iter()
        .map(|name| name.parse::<ToolId>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut r = ctx.renderer();
    let availability = probe(&ctx.registry);
    for line in availability.report() {
        r.line(line, Severity::Normal)?;
    }

    scan_target(&mut r, &target, ctx).await?;
    let suggested = suggest_tools(&target, &availability);
    report_suggestions(&mut r, &suggested)?;

    let selection = Selection {
        requested: &requested,
        all: args.all,
        suggested: args.suggested.then_some(suggested.as_slice()),
    };
    let selected = selection.resolve(&availability, &mut r)?;

    let cancel = CancelFlag::new();
    let launcher = HostTerminal::new();
    // Prompts block on stdin; they go to stderr so a JSONL stdout stays clean.
    let planned = tokio::task::block_in_place(|| {
        let stdin = io::stdin();
        let mut prompts = TerminalPrompter::new(stdin.lock(), io::stderr())
            .with_masked_secrets(atty::is(atty::Stream::Stdin));
        plan_session(
            PlanArgs {
                registry: &ctx.registry,
                target: &target,
                tools: &selected,
                cancel: cancel.clone(),
                shell: ShellFlavor::host(),
                launcher: &launcher,
            },
            &mut prompts,
        )
    });
    for note in planned.notes {
        r.segment(note)?;
    }
    if planned.session.is_empty() {
        save_log(&mut r, args.save.as_deref()).await?;
        return Ok(0);
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(run_session(RunSessionArgs {
        session: planned.session,
        poll_interval: ctx.config.runner.poll_interval(),
        event_tx: Some(tx),
    }));

    let mut stop_requested = false;
    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else { break };
                let done = matches!(event, RunnerEvent::RunComplete { .. });
                r.event(event)?;
                if done {
                    break;
                }
            }
            res = tokio::signal::ctrl_c(), if !stop_requested => {
                match res {
                    Ok(()) => {
                        cancel.cancel();
                        stop_requested = true;
                        r.line(STOP_REQUESTED, Severity::Error)?;
                    }
                    Err(e) => {
                        tracing::warn!(error.message = %e, "failed to listen for ctrl-c");
                        stop_requested = true;
                    }
                }
            }
        }
    }

    let outcome = worker.await?;
    tracing::info!(state = ?outcome.state, results = outcome.results.len(), "run ended");
    save_log(&mut r, args.save.as_deref()).await?;
    Ok(exit_code(outcome.state))
}

pub fn exit_code(state: RunState) -> i32 {
    match state {
        RunState::Completed => 0,
        RunState::Failed => 1,
        RunState::Cancelled => 130,
    }
}

/// Which tools the user asked for on the command line.
struct Selection<'a> {
    requested: &'a [ToolId],
    all: bool,
    suggested: Option<&'a [ToolId]>,
}

impl Selection<'_> {
    /// Selected tools in registry order. Unavailable tools are never selectable.
    fn resolve<W: Write>(
        &self,
        availability: &Availability,
        r: &mut Renderer<W>,
    ) -> Result<Vec<ToolId>, CliError> {
        let mut selected = Vec::new();
        for id in ToolId::ALL {
            let wanted = self.all
                || self.requested.contains(&id)
                || self.suggested.is_some_and(|s| s.contains(&id));
            if !wanted {
                continue;
            }
            if availability.is_available(id) {
                selected.push(id);
            } else if self.requested.contains(&id) {
                r.line(
                    format!("[!] {id} is not installed, skipping.\n"),
                    Severity::Warning,
                )?;
            }
        }
        Ok(selected)
    }
}

async fn save_log<W: Write>(r: &mut Renderer<W>, path: Option<&Path>) -> Result<(), CliError> {
    let Some(path) = path else {
        return Ok(());
    };
    let outcome = r.log().export(path).await?;
    match outcome {
        ExportOutcome::Empty => r.line("[!] Log is empty. Nothing to save.\n", Severity::Warning),
        ExportOutcome::Written { path, .. } => {
            r.line(format!("[+] Log saved to {}\n", path.display()), Severity::Success)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cli::StreamFormat;
    use crate::render::Palette;
    use pretty_assertions::assert_eq;

    fn renderer() -> Renderer<Vec<u8>> {
        Renderer::new(Vec::new(), StreamFormat::Text, Palette::mono())
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(RunState::Completed), 0);
        assert_eq!(exit_code(RunState::Failed), 1);
        assert_eq!(exit_code(RunState::Cancelled), 130);
    }

    #[test]
    fn test_selection_order_and_availability() {
        let availability = Availability::from_pairs(
            ToolId::ALL.into_iter().map(|id| (id, id != ToolId::Jsteg)),
        );
        let mut r = renderer();
        let selection = Selection {
            requested: &[ToolId::Hashcat, ToolId::Jsteg],
            all: false,
            suggested: Some(&[ToolId::Zsteg, ToolId::Binwalk][..]),
        };

        let selected = selection.resolve(&availability, &mut r).unwrap();

        assert_eq!(selected, vec![ToolId::Binwalk, ToolId::Zsteg, ToolId::Hashcat]);
        assert_eq!(r.log().content(), "[!] jsteg is not installed, skipping.\n");
    }

    #[test]
    fn test_select_all_skips_missing_silently() {
        let availability = Availability::from_pairs(
            ToolId::ALL.into_iter().map(|id| (id, id == ToolId::Steghide)),
        );
        let mut r = renderer();
        let selection = Selection {
            requested: &[],
            all: true,
            suggested: None,
        };

        assert_eq!(
            selection.resolve(&availability, &mut r).unwrap(),
            vec![ToolId::Steghide]
        );
        assert!(r.log().is_empty());
    }

    #[tokio::test]
    async fn test_save_log_reports_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        let mut r = renderer();

        save_log(&mut r, Some(&path)).await.unwrap();
        assert!(!path.exists());
        assert!(r.log().content().contains("Nothing to save"));

        r.line("[+] Found: zsteg\n", Severity::Normal).unwrap();
        save_log(&mut r, Some(&path)).await.unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[+] Found: zsteg"));
    }
}
