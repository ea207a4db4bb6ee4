use stegsuite_core::api::{BuildContext, Command, ConfigProvider, PlanError, ToolHandler, ToolId};

/// No options: always `steghide info <file>`.
pub struct SteghideHandler;

impl ToolHandler for SteghideHandler {
    fn tool(&self) -> ToolId {
        ToolId::Steghide
    }

    fn plan(&self, ctx: &BuildContext<'_>, _prompts: &mut dyn ConfigProvider) -> Result<Command, PlanError> {
        Ok(Command::argv([ctx.exe().to_string(), "info".into(), ctx.target_arg()]))
    }
}
