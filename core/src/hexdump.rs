//! Canonical hex+ASCII dump, the same layout as `hexdump -C`.
//!
//! ```text
//! 00000000  89 50 4e 47 0d 0a 1a 0a  00 00 00 0d 49 48 44 52  |.PNG........IHDR|
//! ```
//!
//! Rows are produced lazily from any [`Read`] source. With a search pattern only
//! rows containing it (case-insensitive) are kept and no line cap applies; without
//! one, output stops after `max_lines` rows.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::cancel::CancelFlag;

pub const BYTES_PER_ROW: usize = 16;
pub const DEFAULT_MAX_LINES: usize = 100;

const HEX_COLUMN_WIDTH: usize = 48;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexdumpOptions {
    pattern: Option<String>,
    max_lines: usize,
}

impl HexdumpOptions {
    /// An empty pattern counts as no pattern.
    pub fn new(pattern: Option<String>, max_lines: usize) -> Self {
        Self {
            pattern: pattern.filter(|p| !p.is_empty()),
            max_lines,
        }
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }
}

impl Default for HexdumpOptions {
    fn default() -> Self {
        Self::new(None, DEFAULT_MAX_LINES)
    }
}

/// Renders one row. `chunk` holds at most [`BYTES_PER_ROW`] bytes.
pub fn render_row(offset: u64, chunk: &[u8]) -> String {
    let mut hex = String::with_capacity(HEX_COLUMN_WIDTH);
    for (i, b) in chunk.iter().enumerate() {
        if i > 0 {
            hex.push(' ');
        }
        if i == 8 {
            hex.push(' ');
        }
        hex.push_str(&format!("{b:02x}"));
    }

    let ascii: String = chunk
        .iter()
        .map(|&b| if (32..=126).contains(&b) { b as char } else { '.' })
        .collect();

    format!(
        "{offset:08x}  {hex:<width$.width$}  |{ascii}|",
        width = HEX_COLUMN_WIDTH
    )
}

/// Lazy row iterator. Yields at most one `Err`, after which it is exhausted.
pub struct HexRows<'a, R> {
    reader: R,
    needle: Option<String>,
    max_lines: usize,
    cancel: &'a CancelFlag,
    offset: u64,
    emitted: usize,
    done: bool,
}

impl<'a, R: Read> HexRows<'a, R> {
    pub fn new(reader: R, opts: &HexdumpOptions, cancel: &'a CancelFlag) -> Self {
        Self {
            reader,
            needle: opts.pattern().map(str::to_lowercase),
            max_lines: opts.max_lines(),
            cancel,
            offset: 0,
            emitted: 0,
            done: false,
        }
    }

    fn at_cap(&self) -> bool {
        self.needle.is_none() && self.emitted >= self.max_lines
    }
}

impl<R: Read> Iterator for HexRows<'_, R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chunk = [0u8; BYTES_PER_ROW];
        loop {
            if self.done || self.at_cap() || self.cancel.is_cancelled() {
                return None;
            }

            let n = match fill_chunk(&mut self.reader, &mut chunk) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(n) => n,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            let row = render_row(self.offset, &chunk[..n]);
            self.offset += n as u64;

            let keep = match &self.needle {
                Some(needle) => row.to_lowercase().contains(needle.as_str()),
                None => true,
            };
            if keep {
                self.emitted += 1;
                return Some(Ok(row));
            }
        }
    }
}

/// Reads until the chunk is full or the source is exhausted.
fn fill_chunk<R: Read>(reader: &mut R, chunk: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < chunk.len() {
        match reader.read(&mut chunk[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Joins all rows, newline-terminated. An I/O failure replaces the whole dump
/// with a single `Error reading file: ...` line.
pub fn dump<R: Read>(reader: R, opts: &HexdumpOptions, cancel: &CancelFlag) -> String {
    let rows: io::Result<Vec<String>> = HexRows::new(reader, opts, cancel).collect();
    match rows {
        Ok(rows) => {
            let mut out = rows.join("\n");
            out.push('\n');
            out
        }
        Err(e) => read_error_line(&e),
    }
}

pub fn dump_file(path: &Path, opts: &HexdumpOptions, cancel: &CancelFlag) -> String {
    match File::open(path) {
        Ok(file) => dump(io::BufReader::new(file), opts, cancel),
        Err(e) => read_error_line(&e),
    }
}

fn read_error_line(e: &io::Error) -> String {
    format!("Error reading file: {e}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(data: &[u8], opts: HexdumpOptions) -> Vec<String> {
        let cancel = CancelFlag::new();
        HexRows::new(data, &opts, &cancel)
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    fn ascii_field(row: &str) -> &str {
        let start = row.find('|').unwrap();
        &row[start + 1..row.len() - 1]
    }

    #[test]
    fn test_full_row_of_a() {
        let out = rows(&[0x41; 16], HexdumpOptions::new(None, 1));
        assert_eq!(
            out,
            vec![
                "00000000  41 41 41 41 41 41 41 41  41 41 41 41 41 41 41 41  |AAAAAAAAAAAAAAAA|"
            ]
        );
    }

    #[test]
    fn test_short_chunks_have_no_gap() {
        for len in 1..=8 {
            let data: Vec<u8> = (0..len as u8).collect();
            let row = render_row(0, &data);
            assert!(!row[10..10 + 48].trim_end().contains("  "), "len {len}");
        }
    }

    #[test]
    fn test_long_chunks_gap_after_eighth_byte() {
        let row = render_row(0x10, &[0xab; 9]);
        let expected = format!(
            "00000010  {:<48}  |.........|",
            "ab ab ab ab ab ab ab ab  ab"
        );
        assert_eq!(row, expected);
        assert_eq!(row[10..10 + 48].trim_end().matches("  ").count(), 1);
    }

    #[test]
    fn test_ascii_mapping_bounds() {
        let row = render_row(0, &[31, 32, 65, 126, 127, 0xff]);
        assert_eq!(ascii_field(&row), ". A~..");
    }

    #[test]
    fn test_row_count_is_ceiling() {
        for n in [0usize, 1, 15, 16, 17, 32, 33, 100] {
            let data = vec![0u8; n];
            let out = rows(&data, HexdumpOptions::new(None, usize::MAX));
            assert_eq!(out.len(), n.div_ceil(16), "n = {n}");
            if let Some(last) = out.last() {
                let tail = if n % 16 == 0 { 16 } else { n % 16 };
                assert_eq!(ascii_field(last).len(), tail);
            }
        }
    }

    #[test]
    fn test_cap_limits_rows() {
        let data = vec![7u8; 16 * 10];
        assert_eq!(rows(&data, HexdumpOptions::new(None, 3)).len(), 3);
        assert_eq!(rows(&data, HexdumpOptions::new(None, 50)).len(), 10);
        assert_eq!(rows(&data, HexdumpOptions::new(None, 0)).len(), 0);
    }

    #[test]
    fn test_pattern_filters_case_insensitively_without_cap() {
        let mut data = vec![0u8; 16 * 4];
        data[20..24].copy_from_slice(b"flag");
        data[50..54].copy_from_slice(b"FLAG");

        let out = rows(&data, HexdumpOptions::new(Some("FlAg".to_string()), 1));
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.to_lowercase().contains("flag")));
        assert!(out[0].starts_with("00000010"));
        assert!(out[1].starts_with("00000030"));
    }

    #[test]
    fn test_pattern_matches_hex_text() {
        let data = [0x89, b'P', b'N', b'G'];
        let out = rows(&data, HexdumpOptions::new(Some("89 50".to_string()), 0));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_empty_pattern_is_no_pattern() {
        let data = vec![1u8; 64];
        assert_eq!(rows(&data, HexdumpOptions::new(Some(String::new()), 2)).len(), 2);
    }

    #[test]
    fn test_cancelled_stops_without_error() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let data = vec![0u8; 64];
        let out = dump(&data[..], &HexdumpOptions::default(), &cancel);
        assert_eq!(out, "\n");
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_io_failure_is_single_line() {
        let out = dump(Broken, &HexdumpOptions::default(), &CancelFlag::new());
        assert_eq!(out, "Error reading file: disk on fire");
    }

    #[test]
    fn test_missing_file_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dump_file(
            &dir.path().join("absent.bin"),
            &HexdumpOptions::default(),
            &CancelFlag::new(),
        );
        assert!(out.starts_with("Error reading file: "));
    }

    #[test]
    fn test_dump_file_joins_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.bin");
        std::fs::write(&path, b"hello world, this is twenty+ bytes").unwrap();

        let out = dump_file(&path, &HexdumpOptions::default(), &CancelFlag::new());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(out.ends_with('\n'));
        assert!(lines[0].ends_with("|hello world, thi|"));
    }
}
