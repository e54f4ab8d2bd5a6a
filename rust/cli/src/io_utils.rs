//! File and stdin helpers shared by the commands.
//!
//! - Reading a line of table input
//! - Reading round history with transparent `.zst` decompression
//! - Collecting history files under a directory
//! - Making sure an output file's directory exists

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

/// Reads one trimmed line, or `None` on EOF or a read error.
///
/// # Example
///
/// ```rust,no_run
/// use std::io::{self, BufRead};
/// # use blackjack_cli::io_utils::read_stdin_line;
///
/// let stdin = io::stdin();
/// let mut handle = stdin.lock();
/// if let Some(line) = read_stdin_line(&mut handle) {
///     println!("You entered: {}", line);
/// }
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Reads a text file, decompressing it first when the name ends in `.zst`.
/// A leading UTF-8 BOM is dropped.
pub fn read_text_auto(path: &Path) -> io::Result<String> {
    let is_zst = path.extension().is_some_and(|ext| ext == "zst");
    let mut content = if is_zst {
        let file = std::fs::File::open(path)?;
        let bytes = zstd::stream::decode_all(file)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
    } else {
        std::fs::read_to_string(path)?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// `true` for `*.jsonl` and `*.jsonl.zst`.
pub fn is_history_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    name.ends_with(".jsonl") || name.ends_with(".jsonl.zst")
}

/// History files under `root`, recursively, in path order. A file path is
/// returned as is.
pub fn collect_history_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    let mut found = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                stack.push(path);
            } else if is_history_file(&path) {
                found.push(path);
            }
        }
    }
    found.sort();
    Ok(found)
}

/// Creates the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
