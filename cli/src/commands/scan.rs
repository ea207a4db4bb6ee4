use std::io::Write;
use std::path::Path;

use stegsuite_core::api::{pre_scan, probe, suggest_tools, ScanHelpers, Severity, ToolId};

use crate::app::{validate_target, AppContext};
use crate::commands::cli::ScanArgs;
use crate::error::CliError;
use crate::render::Renderer;

pub async fn handle_scan(args: ScanArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let target = validate_target(&args.file)?;
    let mut r = ctx.renderer();

    let availability = probe(&ctx.registry);
    scan_target(&mut r, &target, ctx).await?;
    report_suggestions(&mut r, &suggest_tools(&target, &availability))?;
    Ok(0)
}

pub(crate) async fn scan_target<W: Write>(
    r: &mut Renderer<W>,
    target: &Path,
    ctx: &AppContext,
) -> Result<(), CliError> {
    let helpers = ScanHelpers::from_config(&ctx.config);
    for segment in pre_scan(target, &helpers).await {
        r.segment(segment)?;
    }
    Ok(())
}

pub(crate) fn report_suggestions<W: Write>(
    r: &mut Renderer<W>,
    suggested: &[ToolId],
) -> Result<(), CliError> {
    if suggested.is_empty() {
        return r.line("[*] No tool suggestions for this file type.\n", Severity::Warning);
    }
    let names: Vec<&str> = suggested.iter().map(|t| t.as_str()).collect();
    r.line(
        format!("[+] Suggested tools: {}\n", names.join(", ")),
        Severity::Success,
    )
}
