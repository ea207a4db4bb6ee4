use stegsuite_core::api::{BuildContext, Command, ConfigProvider, Decision, PlanError, ToolHandler, ToolId};

pub struct BinwalkHandler;

impl ToolHandler for BinwalkHandler {
    fn tool(&self) -> ToolId {
        ToolId::Binwalk
    }

    fn plan(&self, ctx: &BuildContext<'_>, prompts: &mut dyn ConfigProvider) -> Result<Command, PlanError> {
        let mut argv = vec![ctx.exe().to_string()];
        match prompts.choose("Binwalk", "Do you want to EXTRACT files? (No for Analyze)")? {
            Decision::Yes => {
                argv.push("-e".into());
                if prompts.confirm("Binwalk", "Use Matryoshka (Recursive) extraction?") {
                    argv.push("-M".into());
                }
            }
            Decision::No => {}
        }
        argv.push(ctx.target_arg());
        Ok(Command::Argv(argv))
    }
}
