use stegsuite_core::api::{BuildContext, Command, ConfigProvider, Decision, PlanError, ToolHandler, ToolId};

use super::path_arg;

pub struct JstegHandler;

impl ToolHandler for JstegHandler {
    fn tool(&self) -> ToolId {
        ToolId::Jsteg
    }

    fn plan(&self, ctx: &BuildContext<'_>, prompts: &mut dyn ConfigProvider) -> Result<Command, PlanError> {
        let exe = ctx.exe().to_string();
        match prompts.choose("Jsteg", "REVEAL data? (No to HIDE)")? {
            Decision::Yes => Ok(Command::argv([exe, "reveal".into(), ctx.target_arg()])),
            Decision::No => {
                let secret = prompts.open_file("Select data to hide")?;
                let output = prompts.save_file("Save output JPEG", Some("jpg"))?;
                Ok(Command::argv([
                    exe,
                    "hide".into(),
                    ctx.target_arg(),
                    path_arg(&secret),
                    path_arg(&output),
                ]))
            }
        }
    }
}
