use stegsuite_core::api::{
    BuildContext, Command, ConfigProvider, Decision, PlanError, ToolHandler, ToolId,
};

use super::path_arg;
use crate::quote::quote;

pub struct ZstegHandler;

impl ToolHandler for ZstegHandler {
    fn tool(&self) -> ToolId {
        ToolId::Zsteg
    }

    fn plan(&self, ctx: &BuildContext<'_>, prompts: &mut dyn ConfigProvider) -> Result<Command, PlanError> {
        let exe = ctx.exe();
        let brute_force = prompts.choose(
            "Zsteg",
            "Run 'All Methods' brute-force scan (-a)?\n\nYes = Brute-force (-a)\nNo = Specific Extraction or Standard Scan\nCancel = Abort",
        )?;
        if brute_force == Decision::Yes {
            return Ok(Command::argv([exe.to_string(), "-a".into(), ctx.target_arg()]));
        }

        if prompts.confirm("Zsteg", "Do you want to EXTRACT a payload (-E)?") {
            let payload = prompts.text(
                "Zsteg Extract",
                "Enter payload config (e.g., '1b,rgb,lsb'):\nCheck previous scan results.",
                false,
            )?;
            if payload.is_empty() {
                return Err(PlanError::Abandoned);
            }
            let save = prompts.save_file("Save Extracted File", None)?;

            // Redirection needs the shell, so every interpolated value is quoted.
            let line = format!(
                "{} -E {} {} > {}",
                quote(ctx.shell, exe),
                quote(ctx.shell, &payload),
                quote(ctx.shell, &ctx.target_arg()),
                quote(ctx.shell, &path_arg(&save)),
            );
            return Ok(Command::ShellLine(line));
        }

        let mut argv = vec![exe.to_string()];
        if prompts.confirm("Zsteg Config", "Disable output limit? (--limit 0)") {
            argv.extend(["--limit".to_string(), "0".to_string()]);
        }
        argv.push(ctx.target_arg());
        Ok(Command::Argv(argv))
    }
}
