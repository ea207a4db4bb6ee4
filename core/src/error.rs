use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("empty argument vector")]
    EmptyCommand,

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("io error while reading {stream}: {source}")]
    StreamIo {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for process: {0}")]
    Wait(#[source] std::io::Error),

    #[error("worker task failed: {0}")]
    Join(String),
}

/// A tool handler failed for a reason other than the user backing out.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to launch external terminal: {0}")]
    Launch(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {secs}s")]
    Timeout { program: String, secs: u64 },

    #[error("{program} returned non-zero exit status {code}")]
    Status { program: String, code: i32 },

    #[error("failed to sniff file type: {0}")]
    Sniff(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to save log to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown tool: {0}")]
pub struct UnknownTool(pub String);
