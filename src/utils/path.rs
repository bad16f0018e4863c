//! Path normalization.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Normalize a path to absolute form, even when it does not exist yet.
///
/// The longest existing ancestor is canonicalized (symlinks resolved) and
/// the remaining components are appended lexically. This keeps
/// `starts_with` comparisons between a real source root and a
/// not-yet-created destination meaningful.
///
/// ```text
/// /tmp/link/assets        (exists)   → /private/tmp/real/assets
/// /tmp/link/assets/out/2x (missing)  → /private/tmp/real/assets/out/2x
/// ```
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    };

    let mut existing = absolute.as_path();
    let mut missing: Vec<&OsStr> = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return lexical_join(canonical, missing.into_iter().rev());
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => return lexical_join(PathBuf::new(), absolute.components().map(|c| c.as_os_str())),
        }
    }
}

/// Append components, folding `.` and `..` without touching the disk.
fn lexical_join<'a, I>(mut base: PathBuf, rest: I) -> PathBuf
where
    I: IntoIterator<Item = &'a OsStr>,
{
    for part in rest {
        match Path::new(part).components().next() {
            Some(Component::CurDir) => {}
            Some(Component::ParentDir) => {
                base.pop();
            }
            _ => base.push(part),
        }
    }
    base
}
