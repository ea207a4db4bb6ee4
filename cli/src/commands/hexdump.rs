use stegsuite_core::api::{dump_file, CancelFlag, HexdumpOptions, Severity};

use crate::app::{validate_target, AppContext};
use crate::commands::cli::HexdumpArgs;
use crate::error::CliError;

pub async fn handle_hexdump(args: HexdumpArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let target = validate_target(&args.file)?;
    let opts = HexdumpOptions::new(args.grep, args.lines);

    let cancel = CancelFlag::new();
    let flag = cancel.clone();
    let mut job = tokio::task::spawn_blocking(move || dump_file(&target, &opts, &flag));

    let text = tokio::select! {
        res = &mut job => res?,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            job.await?
        }
    };

    let failed = text.starts_with("Error reading file:");
    let mut r = ctx.renderer();
    r.line(text, Severity::Normal)?;
    Ok(if failed { 1 } else { 0 })
}
