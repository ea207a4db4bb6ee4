use clap::Parser;
mod app;
mod commands;
mod error;
mod prompt;
mod render;

use commands::cli;
use error::CliError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();
    let ctx = app::AppContext::load(&args);

    match dispatch(args.command, &ctx).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(error.message = %e, "command failed");
            eprintln!("[-] {e}");
            std::process::exit(1);
        }
    }
}

async fn dispatch(cmd: cli::Commands, ctx: &app::AppContext) -> Result<i32, CliError> {
    match cmd {
        cli::Commands::Tools => commands::tools::handle_tools(ctx),
        cli::Commands::Scan(scan_args) => commands::scan::handle_scan(scan_args, ctx).await,
        cli::Commands::Run(run_args) => commands::run::handle_run(run_args, ctx).await,
        cli::Commands::Hexdump(hexdump_args) => {
            commands::hexdump::handle_hexdump(hexdump_args, ctx).await
        }
    }
}
