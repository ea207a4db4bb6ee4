//! Escaping for values interpolated into a [`Command::ShellLine`].
//!
//! [`Command::ShellLine`]: stegsuite_core::api::Command::ShellLine

use stegsuite_core::api::ShellFlavor;

pub fn quote(flavor: ShellFlavor, value: &str) -> String {
    match flavor {
        ShellFlavor::Posix => posix_quote(value),
        ShellFlavor::Windows => windows_quote(value),
    }
}

fn is_posix_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c)
}

/// Same rules as Python's `shlex.quote`.
pub fn posix_quote(value: &str) -> String {
    if value.is_empty() {
        return "''".to_string();
    }
    if value.chars().all(is_posix_safe) {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', r#"'"'"'"#))
}

/// cmd.exe double quoting; embedded quotes are doubled.
pub fn windows_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_posix_safe_values_unchanged() {
        assert_eq!(posix_quote("/tmp/x.png"), "/tmp/x.png");
        assert_eq!(posix_quote("1b,rgb,lsb"), "1b,rgb,lsb");
        assert_eq!(posix_quote("b1:r=lsb@x%y+z"), "b1:r=lsb@x%y+z");
    }

    #[test]
    fn test_posix_quotes_metacharacters() {
        assert_eq!(posix_quote(""), "''");
        assert_eq!(posix_quote("my file.png"), "'my file.png'");
        assert_eq!(posix_quote("a;rm -rf ~"), "'a;rm -rf ~'");
        assert_eq!(posix_quote("it's"), r#"'it'"'"'s'"#);
        assert_eq!(posix_quote("$(id)"), "'$(id)'");
    }

    #[test]
    fn test_windows_quoting() {
        assert_eq!(windows_quote(r"C:\a b\x.png"), r#""C:\a b\x.png""#);
        assert_eq!(windows_quote(r#"say "hi""#), r#""say ""hi""""#);
        assert_eq!(quote(ShellFlavor::Windows, ""), r#""""#);
    }
}
