//! Directory traversal for the CLI binary. Never used by `engine::lint`
//! itself — spec.md §1 keeps discovery an external collaborator so the core
//! stays a pure per-file function.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static IGNORE_DIRS: LazyLock<GlobSet> = LazyLock::new(|| {
    let mut builder = GlobSetBuilder::new();
    for pattern in [".git", "node_modules", "target"] {
        builder.add(Glob::new(pattern).unwrap());
    }
    builder.build().unwrap()
});

fn is_script_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bat") || ext.eq_ignore_ascii_case("cmd"))
}

fn is_ignored_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| IGNORE_DIRS.is_match(name))
}

/// Finds every `.bat`/`.cmd` file under `root`. If `root` is itself a file,
/// returns just that file regardless of extension (the CLI trusts an
/// explicit path). `recursive = false` limits a directory walk to depth 1.
pub fn discover(root: &Path, recursive: bool) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    let mut files = Vec::new();
    walk(root, recursive, &mut files);
    files.sort();
    files
}

fn walk(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else { return };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if recursive && !is_ignored_dir(&path) {
                walk(&path, recursive, files);
            }
        } else if is_script_extension(&path) {
            files.push(path);
        }
    }
}
