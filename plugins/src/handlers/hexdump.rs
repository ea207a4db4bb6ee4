use stegsuite_core::api::{
    BuildContext, BuildError, Command, ConfigProvider, Decision, PlanError, ShellFlavor,
    ToolHandler, ToolId, DEFAULT_MAX_LINES,
};

use crate::quote::quote;

pub struct HexdumpHandler;

impl HexdumpHandler {
    /// The pager pipeline opened in the external window.
    pub fn pager_line(ctx: &BuildContext<'_>) -> String {
        let pager = match ctx.shell {
            ShellFlavor::Posix => "less",
            ShellFlavor::Windows => "more",
        };
        format!(
            "{} -C {} | {pager}",
            quote(ctx.shell, ctx.exe()),
            quote(ctx.shell, &ctx.target_arg())
        )
    }
}

impl ToolHandler for HexdumpHandler {
    fn tool(&self) -> ToolId {
        ToolId::Hexdump
    }

    fn plan(&self, ctx: &BuildContext<'_>, prompts: &mut dyn ConfigProvider) -> Result<Command, PlanError> {
        match prompts.choose("Hexdump", "Use 'less' mode (External Window)?")? {
            Decision::Yes => {
                let line = Self::pager_line(ctx);
                ctx.launcher.launch(&line).map_err(BuildError::Launch)?;
                Ok(Command::ExternalLaunch)
            }
            Decision::No => {
                // Dismissing either prompt falls back to a plain head of the file.
                let pattern = prompts
                    .text("Hexdump", "Enter pattern to grep (Cancel/Empty for head):", false)
                    .ok()
                    .filter(|p| !p.is_empty());
                let max_lines = match pattern {
                    Some(_) => DEFAULT_MAX_LINES,
                    None => prompts
                        .integer("Hexdump", "How many lines to see?", DEFAULT_MAX_LINES as i64, Some(1))
                        .ok()
                        .and_then(|n| usize::try_from(n).ok())
                        .filter(|n| *n > 0)
                        .unwrap_or(DEFAULT_MAX_LINES),
                };
                Ok(Command::InternalHexdump { pattern, max_lines })
            }
        }
    }
}
