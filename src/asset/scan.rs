//! Source discovery (pure, no side effects).

use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use jwalk::WalkDir;

use crate::core::is_density_dir_name;
use crate::debug;

const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Discovery filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions<'a> {
    /// Subtree to leave out (the destination, when it lives inside the source)
    pub exclude: Option<&'a Path>,
    /// Skip `<N.N>x/` directories directly under the root
    pub skip_density_dirs: bool,
    /// Stop walking once this flag is set
    pub cancel: Option<&'a AtomicBool>,
}

/// Collect every regular file under `root`, sorted by path.
///
/// Hidden files and directories are skipped. Symlinks are followed, so a
/// linked file counts under the link's own path. Walk errors (permission
/// denied, vanished entries, link loops) are logged in verbose mode and
/// otherwise ignored.
///
/// ```text
/// assets_source/
/// ├── icon.png            -> collected
/// ├── data/stats.json     -> collected
/// ├── 2.0x/icon.png       -> skipped (density dir, skip_density_dirs)
/// └── .cache/tmp.png      -> skipped (hidden)
/// ```
pub fn discover_files(root: &Path, options: ScanOptions<'_>) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort(true)
        .follow_links(true)
        .into_iter()
        .take_while(|_| !options.cancel.is_some_and(|c| c.load(Ordering::Relaxed)))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("scan"; "skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|e| e.path())
        .filter(|path| !is_excluded(path, root, options))
        .collect()
}

fn is_excluded(path: &Path, root: &Path, options: ScanOptions<'_>) -> bool {
    if options.exclude.is_some_and(|exclude| path.starts_with(exclude)) {
        return true;
    }

    if !options.skip_density_dirs {
        return false;
    }

    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };
    let mut components = relative.components();
    match (components.next(), components.next()) {
        // Only a directory component counts, not a file named `2x`
        (Some(Component::Normal(first)), Some(_)) => {
            first.to_str().is_some_and(is_density_dir_name)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    fn relative(root: &Path, files: Vec<PathBuf>) -> Vec<String> {
        files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_discover_recursive_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.png");
        touch(dir.path(), "a/deep/c.json");
        touch(dir.path(), "a/z.svg");

        let files = discover_files(dir.path(), ScanOptions::default());
        assert_eq!(
            relative(dir.path(), files),
            vec!["a/deep/c.json", "a/z.svg", "b.png"]
        );
    }

    #[test]
    fn test_discover_skips_hidden_and_junk() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "icon.png");
        touch(dir.path(), ".hidden/x.png");
        touch(dir.path(), "sub/.DS_Store");

        let files = discover_files(dir.path(), ScanOptions::default());
        assert_eq!(relative(dir.path(), files), vec!["icon.png"]);
    }

    #[test]
    fn test_discover_excludes_nested_destination() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "icon.png");
        touch(dir.path(), "out/icon.png");
        touch(dir.path(), "out/2.0x/icon.png");

        let exclude = dir.path().join("out");
        let options = ScanOptions {
            exclude: Some(&exclude),
            ..ScanOptions::default()
        };
        let files = discover_files(dir.path(), options);
        assert_eq!(relative(dir.path(), files), vec!["icon.png"]);
    }

    #[test]
    fn test_discover_skips_density_dirs() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "icon.png");
        touch(dir.path(), "2.0x/icon.png");
        touch(dir.path(), "3x/icon.png");
        touch(dir.path(), "2x");
        touch(dir.path(), "nested/2.0x/keep.png");

        let options = ScanOptions {
            skip_density_dirs: true,
            ..ScanOptions::default()
        };
        let files = discover_files(dir.path(), options);
        assert_eq!(
            relative(dir.path(), files),
            vec!["2x", "icon.png", "nested/2.0x/keep.png"]
        );

        let all = discover_files(dir.path(), ScanOptions::default());
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_discover_stops_when_cancelled() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.png");
        touch(dir.path(), "b/c.png");

        let cancel = AtomicBool::new(true);
        let options = ScanOptions {
            cancel: Some(&cancel),
            ..ScanOptions::default()
        };
        assert!(discover_files(dir.path(), options).is_empty());

        cancel.store(false, Ordering::Relaxed);
        assert_eq!(discover_files(dir.path(), options).len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_follows_symlinks() {
        let dir = TempDir::new().unwrap();
        let shared = TempDir::new().unwrap();
        touch(shared.path(), "logo.png");
        touch(shared.path(), "icons/star.png");
        touch(dir.path(), "icon.png");
        std::os::unix::fs::symlink(shared.path().join("logo.png"), dir.path().join("logo.png"))
            .unwrap();
        std::os::unix::fs::symlink(shared.path().join("icons"), dir.path().join("icons")).unwrap();

        let files = discover_files(dir.path(), ScanOptions::default());
        assert_eq!(
            relative(dir.path(), files),
            vec!["icon.png", "icons/star.png", "logo.png"]
        );
    }

    #[test]
    fn test_discover_missing_root() {
        let files = discover_files(Path::new("/nonexistent/densify/src"), ScanOptions::default());
        assert!(files.is_empty());
    }
}
