// Source excerpts

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Read at most `max_len` bytes from the start of `path`.
pub fn read_excerpt<P: AsRef<Path>>(path: P, max_len: usize) -> io::Result<Vec<u8>> {
    let file = File::open(path.as_ref())?;
    let mut buf = Vec::with_capacity(max_len.min(64 * 1024));
    file.take(max_len as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

/// Body stored for a file that could not be opened
pub fn unreadable_placeholder(path: &str) -> String {
    format!("(Could not read file '{}')", path)
}
