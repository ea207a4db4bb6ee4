use stegsuite_core::api::{probe, Severity};

use crate::app::AppContext;
use crate::error::CliError;

pub fn handle_tools(ctx: &AppContext) -> Result<i32, CliError> {
    let mut r = ctx.renderer();
    let availability = probe(&ctx.registry);
    for line in availability.report() {
        r.line(line, Severity::Normal)?;
    }

    for tool in ctx.registry.iter() {
        let status = if availability.is_available(tool.id) {
            "available"
        } else {
            "missing"
        };
        let mut row = format!("{:<10} {:<10} {}", tool.id.as_str(), status, tool.executable);
        if let Some(help) = &tool.help {
            row.push_str("  ");
            row.push_str(help);
        }
        row.push('\n');
        r.line(row, Severity::Normal)?;
    }
    Ok(0)
}
