/// Maps an exit status to a single code; signal deaths become `128 + signal`.
pub fn normalize_exit(status: std::process::ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        match (status.code(), status.signal()) {
            (Some(code), _) => code,
            (None, Some(sig)) => 128 + sig,
            (None, None) => 1,
        }
    }
    #[cfg(not(unix))]
    {
        status.code().unwrap_or(1)
    }
}
