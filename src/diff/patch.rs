use super::ChangedLines;
use crate::errors::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

static HUNK_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("valid hunk header regex")
});

struct Hunk {
    old_remaining: usize,
    new_remaining: usize,
    next_line: usize,
}

/// Collect the added lines of a unified diff.
///
/// Paths are taken from `+++` headers with the conventional `b/` prefix
/// removed. Deleted files contribute nothing.
pub fn parse_unified_diff(patch: &str) -> Result<ChangedLines> {
    let mut changed = ChangedLines::new();
    let mut current: Option<PathBuf> = None;
    let mut hunk: Option<Hunk> = None;

    for (index, line) in patch.lines().enumerate() {
        if let Some(h) = hunk.as_mut() {
            if h.old_remaining > 0 || h.new_remaining > 0 {
                match line.as_bytes().first() {
                    Some(b'+') => {
                        if let Some(file) = &current {
                            changed.insert(file.clone(), h.next_line);
                        }
                        h.next_line += 1;
                        h.new_remaining = h.new_remaining.saturating_sub(1);
                    }
                    Some(b'-') => h.old_remaining = h.old_remaining.saturating_sub(1),
                    Some(b'\\') => {}
                    _ => {
                        h.next_line += 1;
                        h.old_remaining = h.old_remaining.saturating_sub(1);
                        h.new_remaining = h.new_remaining.saturating_sub(1);
                    }
                }
                continue;
            }
            hunk = None;
        }

        if let Some(rest) = line.strip_prefix("+++ ") {
            current = parse_target_path(rest);
        } else if line.starts_with("@@") {
            hunk = Some(parse_hunk_header(line, index + 1)?);
        }
    }

    Ok(changed)
}

fn parse_target_path(header: &str) -> Option<PathBuf> {
    // Some tools append a tab and a timestamp after the path.
    let path = header.split('\t').next().unwrap_or(header).trim();
    if path == "/dev/null" {
        return None;
    }
    let path = path.strip_prefix("b/").unwrap_or(path);
    Some(PathBuf::from(path))
}

fn parse_hunk_header(line: &str, line_number: usize) -> Result<Hunk> {
    let caps = HUNK_HEADER.captures(line).ok_or_else(|| Error::DiffParse {
        line: line_number,
        message: format!("malformed hunk header {line:?}"),
    })?;
    let number = |i: usize, default: usize| -> usize {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(default)
    };

    Ok(Hunk {
        old_remaining: number(2, 1),
        new_remaining: number(4, 1),
        next_line: number(3, 0),
    })
}
