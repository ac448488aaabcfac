use super::ChangedLines;
use crate::errors::{Error, Result};
use git2::{DiffOptions, Repository};
use std::path::{Path, PathBuf};

/// Lines added in the working tree (index and untracked files included)
/// relative to `revision`, or to `HEAD` when no revision is given.
///
/// Returned paths are relative to `root`, which may be a subdirectory of
/// the repository.
pub fn changed_lines_from_git(root: &Path, revision: Option<&str>) -> Result<ChangedLines> {
    let repo = Repository::discover(root)?;
    let workdir = repo
        .workdir()
        .ok_or_else(|| Error::Configuration("diff mode needs a non-bare repository".into()))?
        .to_path_buf();

    let revision = revision.unwrap_or("HEAD");
    let tree = repo.revparse_single(revision)?.peel_to_tree()?;

    let mut opts = DiffOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .show_untracked_content(true)
        .context_lines(0);
    let diff = repo.diff_tree_to_workdir_with_index(Some(&tree), Some(&mut opts))?;

    let mut changed = ChangedLines::new();
    diff.foreach(
        &mut |_, _| true,
        None,
        None,
        Some(&mut |delta, _hunk, line| {
            if line.origin() == '+' {
                if let (Some(path), Some(lineno)) = (delta.new_file().path(), line.new_lineno()) {
                    changed.insert(path.to_path_buf(), lineno as usize);
                }
            }
            true
        }),
    )?;

    log::debug!(
        "Found {} changed lines in {} files since {}",
        changed.line_count(),
        changed.file_count(),
        revision
    );
    Ok(changed.rebase(&root_prefix(root, &workdir)))
}

fn root_prefix(root: &Path, workdir: &Path) -> PathBuf {
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let workdir = workdir
        .canonicalize()
        .unwrap_or_else(|_| workdir.to_path_buf());
    root.strip_prefix(&workdir)
        .map(Path::to_path_buf)
        .unwrap_or_default()
}
