use stegsuite_core::api::{BuildContext, Command, ConfigProvider, Decision, PlanError, ToolHandler, ToolId};

use super::path_arg;

pub struct HashcatHandler;

impl ToolHandler for HashcatHandler {
    fn tool(&self) -> ToolId {
        ToolId::Hashcat
    }

    fn plan(&self, ctx: &BuildContext<'_>, prompts: &mut dyn ConfigProvider) -> Result<Command, PlanError> {
        let exe = ctx.exe().to_string();
        match prompts.choose("Hashcat", "IDENTIFY hash? (No to CRACK)")? {
            Decision::Yes => Ok(Command::argv([exe, ctx.target_arg()])),
            Decision::No => {
                let hash_type = prompts.integer("Hashcat", "Hash-type Num:", 0, None)?;
                let wordlist = prompts.open_file("Select Wordlist")?;
                Ok(Command::argv([
                    exe,
                    "-a".into(),
                    "0".into(),
                    "-m".into(),
                    hash_type.to_string(),
                    ctx.target_arg(),
                    path_arg(&wordlist),
                    "--show".into(),
                ]))
            }
        }
    }
}
