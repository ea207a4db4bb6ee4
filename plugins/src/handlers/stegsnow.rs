use stegsuite_core::api::{BuildContext, Command, ConfigProvider, Decision, PlanError, ToolHandler, ToolId};

use super::path_arg;

pub struct StegsnowHandler;

impl ToolHandler for StegsnowHandler {
    fn tool(&self) -> ToolId {
        ToolId::Stegsnow
    }

    fn plan(&self, ctx: &BuildContext<'_>, prompts: &mut dyn ConfigProvider) -> Result<Command, PlanError> {
        let mut argv = vec![ctx.exe().to_string(), "-C".to_string()];
        match prompts.choose("Stegsnow", "Reveal hidden data? (No to HIDE)")? {
            Decision::Yes => {
                // The password is optional; dismissing the prompt just omits it.
                if let Ok(pwd) = prompts.text("Passphrase", "Enter password:", true) {
                    if !pwd.is_empty() {
                        argv.extend(["-p".to_string(), pwd]);
                    }
                }
                argv.push(ctx.target_arg());
            }
            Decision::No => {
                let message = prompts.text("Message", "Enter message to hide:", false)?;
                if message.is_empty() {
                    return Err(PlanError::Abandoned);
                }
                let output = prompts.save_file("Save as", Some("txt"))?;
                argv.extend(["-m".to_string(), message, ctx.target_arg(), path_arg(&output)]);
            }
        }
        Ok(Command::Argv(argv))
    }
}
