use crate::tool::{OutputFilter, OutputPolicy};

pub const NO_OUTPUT_NOTICE: &str = "[+] Done (No Output).\n";
pub const NO_HIDDEN_DATA_NOTICE: &str = "[*] Zsteg completed. No hidden data detected.\n";

/// What gets logged for a tool that exited 0.
pub(crate) fn success_output(policy: &OutputPolicy, stdout: &str) -> String {
    let output = if stdout.is_empty() {
        NO_OUTPUT_NOTICE
    } else {
        stdout
    };
    match policy.filter {
        OutputFilter::Verbatim => output.to_string(),
        OutputFilter::DropTruncatedGuesses => drop_truncated_guesses(output),
    }
}

/// Removes lines ending in `..`; an all-noise output becomes a notice.
pub fn drop_truncated_guesses(output: &str) -> String {
    let kept: Vec<&str> = output
        .lines()
        .filter(|line| !line.trim().ends_with(".."))
        .collect();
    if kept.is_empty() {
        return NO_HIDDEN_DATA_NOTICE.to_string();
    }
    let mut out = kept.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolId;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keeps_only_confident_lines() {
        assert_eq!(drop_truncated_guesses("a..\nb\nc..\n"), "b\n");
    }

    #[test]
    fn test_all_noise_becomes_notice() {
        assert_eq!(
            drop_truncated_guesses("b1,r,lsb,xy .. \nb2,g,msb,xy ..\n"),
            NO_HIDDEN_DATA_NOTICE
        );
    }

    #[test]
    fn test_single_dot_is_kept() {
        assert_eq!(drop_truncated_guesses("file: PNG image.\n"), "file: PNG image.\n");
    }

    #[test]
    fn test_success_output_by_policy() {
        let zsteg = ToolId::Zsteg.output_policy();
        let binwalk = ToolId::Binwalk.output_policy();

        assert_eq!(success_output(&binwalk, "x..\n"), "x..\n");
        assert_eq!(success_output(&binwalk, ""), NO_OUTPUT_NOTICE);
        assert_eq!(success_output(&zsteg, "x..\n"), NO_HIDDEN_DATA_NOTICE);
        // the empty-output notice survives the zsteg filter
        assert_eq!(success_output(&zsteg, ""), NO_OUTPUT_NOTICE);
    }
}
