// Result display helpers

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const HIGHLIGHT_START: &str = "\x1b[1;33m";
const HIGHLIGHT_END: &str = "\x1b[0m";

/// First line of a file that contains the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingLine {
    /// 1-based line number
    pub line_number: usize,

    /// Line text without its line terminator
    pub text: String,
}

/// Wrap every case-insensitive occurrence of `term` in ANSI bright yellow.
///
/// The line keeps its original casing.
pub fn highlight_term(line: &str, term: &str) -> String {
    if term.is_empty() {
        return line.to_string();
    }

    // ASCII lowercasing keeps byte offsets, so match positions map 1:1.
    let lowered_line = line.to_ascii_lowercase();
    let lowered_term = term.to_ascii_lowercase();

    let mut out = String::with_capacity(line.len() + 16);
    let mut last = 0;
    for (start, matched) in lowered_line.match_indices(&lowered_term) {
        let end = start + matched.len();
        out.push_str(&line[last..start]);
        out.push_str(HIGHLIGHT_START);
        out.push_str(&line[start..end]);
        out.push_str(HIGHLIGHT_END);
        last = end;
    }
    out.push_str(&line[last..]);
    out
}

/// Find the first line of `path` containing `query`, ignoring ASCII case.
pub fn extract_matching_line<P: AsRef<Path>>(
    path: P,
    query: &str,
) -> io::Result<Option<MatchingLine>> {
    let mut reader = BufReader::new(File::open(path)?);
    let needle = query.to_ascii_lowercase();

    let mut buf = Vec::new();
    let mut line_number = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        line_number += 1;

        let line = String::from_utf8_lossy(&buf);
        if line.to_ascii_lowercase().contains(&needle) {
            let text = line.trim_end_matches(['\n', '\r']).to_string();
            return Ok(Some(MatchingLine { line_number, text }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_highlight_preserves_case() {
        let out = highlight_term("Hello hello", "HELLO");
        assert_eq!(
            out,
            "\x1b[1;33mHello\x1b[0m \x1b[1;33mhello\x1b[0m"
        );
    }

    #[test]
    fn test_highlight_no_match() {
        assert_eq!(highlight_term("abc", "x"), "abc");
        assert_eq!(highlight_term("abc", ""), "abc");
    }

    #[test]
    fn test_extract_matching_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first line").unwrap();
        writeln!(file, "Second LINE with Target").unwrap();
        writeln!(file, "target again").unwrap();

        let found = extract_matching_line(file.path(), "target").unwrap().unwrap();
        assert_eq!(found.line_number, 2);
        assert_eq!(found.text, "Second LINE with Target");

        assert!(extract_matching_line(file.path(), "absent").unwrap().is_none());
    }

    #[test]
    fn test_extract_matching_line_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(extract_matching_line(dir.path().join("nope"), "x").is_err());
    }
}
