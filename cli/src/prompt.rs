//! Line-based prompts on a terminal, standing in for modal dialogs.
//!
//! `:cancel` on any prompt, or end of input, abandons the current tool.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use stegsuite_core::api::{Abandoned, ConfigProvider, Decision};

pub const CANCEL_WORD: &str = ":cancel";

/// What one key press does to a masked answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SecretKey {
    Typed,
    Erased,
    Ignored,
    Submit,
    Abandon,
}

fn feed_secret_key(buf: &mut String, key: KeyEvent) -> SecretKey {
    if key.kind != KeyEventKind::Press {
        return SecretKey::Ignored;
    }
    match key.code {
        KeyCode::Enter => SecretKey::Submit,
        KeyCode::Esc => SecretKey::Abandon,
        KeyCode::Char('c' | 'd') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            SecretKey::Abandon
        }
        KeyCode::Backspace => {
            if buf.pop().is_some() {
                SecretKey::Erased
            } else {
                SecretKey::Ignored
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buf.push(c);
            SecretKey::Typed
        }
        _ => SecretKey::Ignored,
    }
}

/// Leaves raw mode when dropped, including on early return.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!(error.message = %e, "failed to leave raw mode");
        }
    }
}

pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
    mask_secrets: bool,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            mask_secrets: false,
        }
    }

    /// Reads secret answers key by key from the controlling terminal, echoing `*`.
    ///
    /// Only meaningful when stdin is a tty; otherwise secrets are read as plain lines.
    pub fn with_masked_secrets(mut self, mask: bool) -> Self {
        self.mask_secrets = mask;
        self
    }

    fn ask_masked(&mut self, title: &str, prompt: &str) -> Option<String> {
        if write!(self.output, "\n[{title}] {prompt} ").is_err() || self.output.flush().is_err() {
            return None;
        }
        let guard = match RawModeGuard::enable() {
            Ok(guard) => guard,
            Err(e) => {
                tracing::warn!(error.message = %e, "raw mode unavailable, secret will echo");
                return self.read_answer();
            }
        };

        let mut buf = String::new();
        let submitted = loop {
            let key = match event::read() {
                Ok(Event::Key(key)) => key,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(error.message = %e, "failed to read key");
                    break false;
                }
            };
            let shown = match feed_secret_key(&mut buf, key) {
                SecretKey::Typed => write!(self.output, "*"),
                SecretKey::Erased => write!(self.output, "\u{8} \u{8}"),
                SecretKey::Ignored => Ok(()),
                SecretKey::Submit => break true,
                SecretKey::Abandon => break false,
            };
            if shown.and_then(|()| self.output.flush()).is_err() {
                break false;
            }
        };
        drop(guard);
        let _ = writeln!(self.output);

        let answer = buf.trim().to_string();
        (submitted && answer != CANCEL_WORD).then_some(answer)
    }

    /// Shows `prompt` and reads one trimmed line. `None` on EOF, I/O failure or `:cancel`.
    fn ask(&mut self, title: &str, prompt: &str) -> Option<String> {
        if write!(self.output, "\n[{title}] {prompt} ").is_err() || self.output.flush().is_err() {
            return None;
        }
        self.read_answer()
    }

    fn read_answer(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let answer = line.trim().to_string();
                (answer != CANCEL_WORD).then_some(answer)
            }
            Err(e) => {
                tracing::warn!(error.message = %e, "failed to read prompt answer");
                None
            }
        }
    }

    fn say(&mut self, text: &str) {
        let _ = writeln!(self.output, "{text}");
    }
}

impl<R: BufRead, W: Write> ConfigProvider for TerminalPrompter<R, W> {
    fn choose(&mut self, title: &str, question: &str) -> Result<Decision, Abandoned> {
        loop {
            let answer = self.ask(title, &format!("{question} [y/n/c]")).ok_or(Abandoned)?;
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(Decision::Yes),
                "n" | "no" => return Ok(Decision::No),
                "c" | "cancel" => return Err(Abandoned),
                _ => self.say("Please answer y, n or c."),
            }
        }
    }

    fn confirm(&mut self, title: &str, question: &str) -> bool {
        match self.ask(title, &format!("{question} [y/N]")) {
            Some(answer) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }

    fn text(&mut self, title: &str, prompt: &str, secret: bool) -> Result<String, Abandoned> {
        let answer = if secret && self.mask_secrets {
            self.ask_masked(title, prompt)
        } else {
            self.ask(title, prompt)
        };
        answer.ok_or(Abandoned)
    }

    fn integer(
        &mut self,
        title: &str,
        prompt: &str,
        initial: i64,
        min: Option<i64>,
    ) -> Result<i64, Abandoned> {
        loop {
            let answer = self
                .ask(title, &format!("{prompt} [{initial}]"))
                .ok_or(Abandoned)?;
            if answer.is_empty() {
                return Ok(initial);
            }
            match answer.parse::<i64>() {
                Ok(n) if min.map_or(true, |m| n >= m) => return Ok(n),
                Ok(_) => self.say(&format!("Value must be at least {}.", min.unwrap_or_default())),
                Err(_) => self.say("Please enter a whole number."),
            }
        }
    }

    fn open_file(&mut self, title: &str) -> Result<PathBuf, Abandoned> {
        loop {
            let answer = self.ask(title, "Path:").ok_or(Abandoned)?;
            if answer.is_empty() {
                return Err(Abandoned);
            }
            let path = PathBuf::from(shellexpand::tilde(&answer).into_owned());
            if path.is_file() {
                return Ok(path);
            }
            self.say("File does not exist!");
        }
    }

    fn save_file(
        &mut self,
        title: &str,
        default_extension: Option<&str>,
    ) -> Result<PathBuf, Abandoned> {
        let answer = self.ask(title, "Save to:").ok_or(Abandoned)?;
        if answer.is_empty() {
            return Err(Abandoned);
        }
        let mut path = PathBuf::from(shellexpand::tilde(&answer).into_owned());
        if let Some(ext) = default_extension {
            if path.extension().is_none() {
                path.set_extension(ext);
            }
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn prompter(input: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_choose_reprompts_until_valid() {
        let mut p = prompter("maybe\nYES\n");
        assert_eq!(p.choose("Binwalk", "Extract?"), Ok(Decision::Yes));
        let shown = String::from_utf8(p.output).unwrap();
        assert!(shown.contains("[Binwalk] Extract? [y/n/c]"));
        assert!(shown.contains("Please answer y, n or c."));
    }

    #[test]
    fn test_cancel_and_eof_abandon() {
        let mut p = prompter("c\n:cancel\n");
        assert_eq!(p.choose("Jsteg", "Reveal?"), Err(Abandoned));
        assert_eq!(p.text("Zsteg Extract", "Payload:", false), Err(Abandoned));
        assert_eq!(p.text("Zsteg Extract", "Payload:", false), Err(Abandoned));
        assert!(!p.confirm("Pngcheck", "Verbose?"));
    }

    #[test]
    fn test_text_keeps_empty_answer() {
        let mut p = prompter("\n  1b,rgb,lsb  \n");
        assert_eq!(p.text("Hexdump", "Pattern:", false), Ok(String::new()));
        assert_eq!(p.text("Zsteg", "Payload:", false), Ok("1b,rgb,lsb".to_string()));
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_secret_keys_edit_buffer() {
        let mut buf = String::new();
        for c in "pa5s".chars() {
            assert_eq!(feed_secret_key(&mut buf, press(KeyCode::Char(c))), SecretKey::Typed);
        }
        assert_eq!(feed_secret_key(&mut buf, press(KeyCode::Backspace)), SecretKey::Erased);
        assert_eq!(feed_secret_key(&mut buf, press(KeyCode::Char('s'))), SecretKey::Typed);
        assert_eq!(feed_secret_key(&mut buf, press(KeyCode::Left)), SecretKey::Ignored);
        assert_eq!(feed_secret_key(&mut buf, press(KeyCode::Enter)), SecretKey::Submit);
        assert_eq!(buf, "pa5s");

        let mut empty = String::new();
        assert_eq!(feed_secret_key(&mut empty, press(KeyCode::Backspace)), SecretKey::Ignored);
    }

    #[test]
    fn test_secret_abandon_keys() {
        let mut buf = String::new();
        assert_eq!(feed_secret_key(&mut buf, press(KeyCode::Esc)), SecretKey::Abandon);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(feed_secret_key(&mut buf, ctrl_c), SecretKey::Abandon);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_secret_ignores_key_release() {
        let mut buf = String::new();
        let mut release = press(KeyCode::Char('x'));
        release.kind = KeyEventKind::Release;
        assert_eq!(feed_secret_key(&mut buf, release), SecretKey::Ignored);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_secret_without_tty_reads_line() {
        let mut p = prompter("hunter2\n");
        assert_eq!(p.text("Stegsnow", "Password:", true), Ok("hunter2".to_string()));
    }

    #[test]
    fn test_integer_default_and_minimum() {
        let mut p = prompter("\n0\nabc\n7\n");
        assert_eq!(p.integer("Hexdump", "Lines?", 100, Some(1)), Ok(100));
        assert_eq!(p.integer("Hexdump", "Lines?", 100, Some(1)), Ok(7));
    }

    #[test]
    fn test_open_file_requires_existing() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let input = format!("/definitely/missing\n{}\n", file.path().display());
        let mut p = prompter(&input);
        assert_eq!(p.open_file("Select Wordlist"), Ok(file.path().to_path_buf()));
        assert!(String::from_utf8(p.output).unwrap().contains("File does not exist!"));
    }

    #[test]
    fn test_save_file_default_extension() {
        let mut p = prompter("/tmp/out\n/tmp/out.png\n\n");
        assert_eq!(p.save_file("Save output JPEG", Some("jpg")), Ok(PathBuf::from("/tmp/out.jpg")));
        assert_eq!(p.save_file("Save output JPEG", Some("jpg")), Ok(PathBuf::from("/tmp/out.png")));
        assert_eq!(p.save_file("Save as", None), Err(Abandoned));
    }
}
