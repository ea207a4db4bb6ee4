use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamFormat {
    #[default]
    Text,
    Jsonl,
}

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Chain steganography and forensics tools against one file")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding config.txt, config_application.txt and tooltips.txt.
    /// Defaults to $STEGSUITE_CONFIG_DIR or the current directory.
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[arg(long, default_value_t = false, global = true)]
    pub no_color: bool,

    #[arg(long, value_enum, default_value_t = StreamFormat::Text, global = true)]
    pub stream_format: StreamFormat,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check which tools are installed.
    Tools,
    /// Identify a file and suggest tools for it.
    Scan(ScanArgs),
    /// Configure and run a chain of tools against a file.
    Run(RunArgs),
    /// Built-in hex viewer.
    Hexdump(HexdumpArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ScanArgs {
    pub file: PathBuf,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    pub file: PathBuf,

    /// Tool to run (internal name). Can be specified multiple times.
    #[arg(long = "tool", action = clap::ArgAction::Append)]
    pub tools: Vec<String>,

    /// Select every available tool.
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// Select the tools suggested for the file's extension.
    #[arg(long, default_value_t = false)]
    pub suggested: bool,

    /// Save the session log to this file when the run ends.
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct HexdumpArgs {
    pub file: PathBuf,

    /// Only show rows containing this text (case-insensitive).
    #[arg(long)]
    pub grep: Option<String>,

    /// Row limit when no pattern is given.
    #[arg(long, default_value_t = stegsuite_core::hexdump::DEFAULT_MAX_LINES)]
    pub lines: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_tools() {
        let args = Args::parse_from([
            "stegsuite",
            "--no-color",
            "run",
            "/tmp/x.png",
            "--tool",
            "zsteg",
            "--tool",
            "binwalk",
            "--save",
            "/tmp/log.txt",
        ]);
        assert!(args.no_color);
        let Commands::Run(run) = args.command else {
            panic!("expected run");
        };
        assert_eq!(run.tools, vec!["zsteg", "binwalk"]);
        assert_eq!(run.save, Some(PathBuf::from("/tmp/log.txt")));
        assert!(!run.all);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args = Args::parse_from(["stegsuite", "hexdump", "a.bin", "--stream-format", "jsonl"]);
        assert_eq!(args.stream_format, StreamFormat::Jsonl);
        let Commands::Hexdump(h) = args.command else {
            panic!("expected hexdump");
        };
        assert_eq!(h.lines, 100);
        assert_eq!(h.grep, None);
    }
}
