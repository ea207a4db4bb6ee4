use stegsuite_core::api::{BuildContext, Command, ConfigProvider, PlanError, ToolHandler, ToolId};

pub struct PngcheckHandler;

impl ToolHandler for PngcheckHandler {
    fn tool(&self) -> ToolId {
        ToolId::Pngcheck
    }

    fn plan(&self, ctx: &BuildContext<'_>, prompts: &mut dyn ConfigProvider) -> Result<Command, PlanError> {
        let verbose = prompts.confirm("Pngcheck", "Verbose mode? (-v)");
        let extract = prompts.confirm("Pngcheck", "Extract embedded PNGs? (-x)");

        let mut argv = vec![ctx.exe().to_string()];
        if verbose {
            argv.push("-v".into());
        }
        if extract {
            argv.push("-x".into());
        }
        argv.push(ctx.target_arg());
        Ok(Command::Argv(argv))
    }
}
