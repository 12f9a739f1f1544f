use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const MAX_PREVIEW_BYTES: u64 = 1024 * 1024;
const SNIFF_BYTES: usize = 1024;
const MAX_LINE_CHARS: usize = 200;

/// First `max_lines` lines of a text file, guarded against huge and
/// binary files. Never fails; problems come back as a bracketed note.
pub fn read_preview(path: &Path, max_lines: usize) -> Vec<String> {
    let Ok(meta) = fs::metadata(path) else {
        return vec!["[Cannot preview]".to_string()];
    };
    if !meta.is_file() {
        return vec!["[Cannot preview]".to_string()];
    }
    let size = meta.len();
    if size > MAX_PREVIEW_BYTES {
        return vec![
            "[File too large to preview]".to_string(),
            format!("Size: {}MB", size / MAX_PREVIEW_BYTES),
        ];
    }
    match read_text(path, max_lines) {
        Ok(Some(lines)) => lines,
        Ok(None) => vec!["[Binary file]".to_string(), format!("Size: {size} bytes")],
        Err(err) => vec![format!("[Error: {err}]")],
    }
}

fn read_text(path: &Path, max_lines: usize) -> std::io::Result<Option<Vec<String>>> {
    let mut head = Vec::with_capacity(SNIFF_BYTES);
    File::open(path)?
        .take(SNIFF_BYTES as u64)
        .read_to_end(&mut head)?;
    if head.contains(&0) {
        return Ok(None);
    }
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::new();
    for raw in reader.split(b'\n').take(max_lines) {
        let raw = raw?;
        let text = String::from_utf8_lossy(&raw);
        lines.push(text.trim_end().chars().take(MAX_LINE_CHARS).collect());
    }
    Ok(Some(lines))
}
