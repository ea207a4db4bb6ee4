use stegsuite_core::api::{BuildContext, Command, ConfigProvider, Decision, PlanError, ToolHandler, ToolId};

use super::path_arg;

pub struct StegseekHandler;

impl ToolHandler for StegseekHandler {
    fn tool(&self) -> ToolId {
        ToolId::Stegseek
    }

    fn plan(&self, ctx: &BuildContext<'_>, prompts: &mut dyn ConfigProvider) -> Result<Command, PlanError> {
        let exe = ctx.exe().to_string();
        match prompts.choose("StegSeek", "CRACK mode? (No for SEED)")? {
            Decision::Yes => {
                let wordlist = prompts.open_file("Select Wordlist")?;
                Ok(Command::argv([exe, ctx.target_arg(), path_arg(&wordlist)]))
            }
            Decision::No => Ok(Command::argv([exe, "--seed".into(), ctx.target_arg()])),
        }
    }
}
