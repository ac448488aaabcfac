use crate::errors::{Error, Result};
use dashmap::DashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Thread-safe cache of source files split into lines.
///
/// Relative paths are resolved against the run root, so processors can use
/// issue paths before and after prettifying.
#[derive(Debug)]
pub struct LineCache {
    root: PathBuf,
    files: DashMap<PathBuf, Arc<Vec<String>>>,
}

impl LineCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: DashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// All lines of a file, loading it on first access.
    pub fn get_lines(&self, path: &Path) -> Result<Arc<Vec<String>>> {
        let resolved = self.resolve(path);
        if let Some(lines) = self.files.get(&resolved) {
            return Ok(Arc::clone(&lines));
        }

        // Non-UTF-8 sources are still scanned for comments and markers.
        let bytes = fs::read(&resolved)
            .map_err(|e| Error::file_system("Can't read source file", &resolved, e))?;
        let contents = String::from_utf8_lossy(&bytes);
        let lines: Arc<Vec<String>> = Arc::new(
            contents
                .split('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
                .collect(),
        );
        self.files.insert(resolved, Arc::clone(&lines));
        Ok(lines)
    }

    /// A single 1-based line of a file.
    ///
    /// Line 0 is treated as line 1: some engines report it for file-level
    /// findings.
    pub fn get_line(&self, path: &Path, line: usize) -> Result<String> {
        let index = line.max(1) - 1;
        let lines = self.get_lines(path)?;
        lines.get(index).cloned().ok_or_else(|| {
            Error::processor(
                "line_cache",
                format!(
                    "invalid line {} for {}: file has {} lines",
                    line,
                    path.display(),
                    lines.len()
                ),
            )
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, LineCache) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.rs"), "first\r\nsecond\nthird").unwrap();
        let cache = LineCache::new(dir.path());
        (dir, cache)
    }

    #[test]
    fn test_get_line_relative_path() {
        let (_dir, cache) = setup();
        assert_eq!(cache.get_line(Path::new("a.rs"), 2).unwrap(), "second");
    }

    #[test]
    fn test_get_line_strips_carriage_return() {
        let (_dir, cache) = setup();
        assert_eq!(cache.get_line(Path::new("a.rs"), 1).unwrap(), "first");
    }

    #[test]
    fn test_line_zero_means_first_line() {
        let (_dir, cache) = setup();
        assert_eq!(cache.get_line(Path::new("a.rs"), 0).unwrap(), "first");
    }

    #[test]
    fn test_non_utf8_file_is_read_lossily() {
        let (dir, cache) = setup();
        fs::write(dir.path().join("latin1.py"), b"# caf\xe9\nx = 1\n").unwrap();
        assert_eq!(cache.get_line(Path::new("latin1.py"), 1).unwrap(), "# caf\u{fffd}");
        assert_eq!(cache.get_line(Path::new("latin1.py"), 2).unwrap(), "x = 1");
    }

    #[test]
    fn test_out_of_range_line_is_error() {
        let (_dir, cache) = setup();
        assert!(cache.get_line(Path::new("a.rs"), 10).is_err());
    }

    #[test]
    fn test_file_is_cached_once() {
        let (dir, cache) = setup();
        cache.get_line(Path::new("a.rs"), 1).unwrap();
        cache.get_line(&dir.path().join("a.rs"), 3).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_missing_file_is_error() {
        let (_dir, cache) = setup();
        assert!(cache.get_lines(Path::new("missing.rs")).is_err());
    }
}
