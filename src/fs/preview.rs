use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::Result;

/// Maximum number of lines (or child names) a preview holds.
pub const MAX_PREVIEW_LINES: usize = 100;

/// Bytes read from a file at most, whatever its line structure.
pub const MAX_PREVIEW_BYTES: u64 = 64 * 1024;

pub const NOT_REGULAR_FILE: &str = "[not a regular file]";
pub const BINARY_FILE: &str = "[binary file]";

/// Read a short textual preview of `path`.
///
/// Files yield their first `max_lines` lines from at most
/// [`MAX_PREVIEW_BYTES`]; non-UTF-8 bytes are replaced lossily and control
/// characters other than tab are masked. Directories yield a
/// `directory <path>:` header followed by up to `max_lines` child names.
/// Devices, FIFOs and sockets are never opened, and files with a NUL byte
/// near the start are reported as binary.
pub fn read_preview(path: &Path, max_lines: usize) -> Result<Vec<String>> {
    let metadata = fs::metadata(path)?;

    if metadata.is_dir() {
        let mut lines = vec![format!("directory {}:", path.display())];
        for item in fs::read_dir(path)?.take(max_lines) {
            let item = item?;
            lines.push(item.file_name().to_string_lossy().to_string());
        }
        return Ok(lines);
    }

    if !metadata.is_file() {
        return Ok(vec![NOT_REGULAR_FILE.to_string()]);
    }

    let mut reader = BufReader::new(fs::File::open(path)?.take(MAX_PREVIEW_BYTES));
    if reader.fill_buf()?.contains(&0) {
        return Ok(vec![BINARY_FILE.to_string()]);
    }

    let mut lines = Vec::new();
    let mut buf = Vec::new();
    while lines.len() < max_lines {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        lines.push(sanitize(&String::from_utf8_lossy(&buf)));
    }
    Ok(lines)
}

fn sanitize(line: &str) -> String {
    line.chars()
        .map(|c| if c.is_control() && c != '\t' { '\u{fffd}' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_file_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "one\ntwo\r\nthree").unwrap();
        let lines = read_preview(&path, MAX_PREVIEW_LINES).unwrap();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn truncates_long_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("long.txt");
        let content: String = (0..500).map(|i| format!("line {i}\n")).collect();
        fs::write(&path, content).unwrap();
        let lines = read_preview(&path, MAX_PREVIEW_LINES).unwrap();
        assert_eq!(lines.len(), MAX_PREVIEW_LINES);
        assert_eq!(lines[99], "line 99");
    }

    #[test]
    fn binary_content_is_lossy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, [0xff, 0xfe, b'a', b'\n']).unwrap();
        let lines = read_preview(&path, MAX_PREVIEW_LINES).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with('a'));
    }

    #[test]
    fn empty_file_has_no_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty");
        fs::write(&path, "").unwrap();
        assert!(read_preview(&path, MAX_PREVIEW_LINES).unwrap().is_empty());
    }

    #[test]
    fn directory_lists_children_under_header() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a"), "").unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        let lines = read_preview(dir.path(), MAX_PREVIEW_LINES).unwrap();
        assert_eq!(lines[0], format!("directory {}:", dir.path().display()));
        let mut children = lines[1..].to_vec();
        children.sort();
        assert_eq!(children, vec!["a", "b"]);
    }

    #[test]
    fn directory_children_are_capped() {
        let dir = TempDir::new().unwrap();
        for i in 0..10 {
            fs::write(dir.path().join(format!("f{i}")), "").unwrap();
        }
        let lines = read_preview(dir.path(), 3).unwrap();
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn missing_path_errors() {
        let dir = TempDir::new().unwrap();
        assert!(read_preview(&dir.path().join("gone"), MAX_PREVIEW_LINES).is_err());
    }

    #[test]
    fn newline_free_file_is_capped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("one-line.txt");
        fs::write(&path, "x".repeat(4 * 1024 * 1024)).unwrap();
        let lines = read_preview(&path, MAX_PREVIEW_LINES).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len() as u64, MAX_PREVIEW_BYTES);
    }

    #[test]
    fn devices_are_not_opened() {
        let lines = read_preview(Path::new("/dev/null"), MAX_PREVIEW_LINES).unwrap();
        assert_eq!(lines, vec![NOT_REGULAR_FILE]);
    }

    #[test]
    fn nul_bytes_mark_binary_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.out");
        fs::write(&path, b"\x7fELF\x02\x01\x00\x00text\n").unwrap();
        let lines = read_preview(&path, MAX_PREVIEW_LINES).unwrap();
        assert_eq!(lines, vec![BINARY_FILE]);
    }

    #[test]
    fn control_characters_are_masked() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("colors.log");
        fs::write(&path, "\x1b[31mred\tok\n").unwrap();
        let lines = read_preview(&path, MAX_PREVIEW_LINES).unwrap();
        assert_eq!(lines, vec!["\u{fffd}[31mred\tok"]);
    }
}
