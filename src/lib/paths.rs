//! Shared helpers reused across modules (e.g., path validation).

use std::path::{Component, Path, PathBuf};

/// Returns true if the path is non-empty and absolute.
pub fn is_nonempty_absolute(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_absolute()
}

/// Anchor a possibly relative path at `base`.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Count the normal segments of a path, ignoring root and `.` components.
pub fn segment_count(path: &Path) -> usize {
    path.components()
        .filter(|component| matches!(component, Component::Normal(_)))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_are_not_absolute() {
        assert!(!is_nonempty_absolute(Path::new("")));
        assert!(!is_nonempty_absolute(Path::new("lib/tool.wasm")));
        assert!(is_nonempty_absolute(Path::new("/opt/lib")));
    }

    #[test]
    fn absolutize_keeps_absolute_paths() {
        let base = Path::new("/home/user");
        assert_eq!(
            absolutize(Path::new("/opt/lib"), base),
            PathBuf::from("/opt/lib")
        );
        assert_eq!(
            absolutize(Path::new("lib"), base),
            PathBuf::from("/home/user/lib")
        );
    }

    #[test]
    fn segment_count_skips_root_and_cur_dir() {
        assert_eq!(segment_count(Path::new("/")), 0);
        assert_eq!(segment_count(Path::new("project/node_modules/pkg/bin")), 4);
        assert_eq!(segment_count(Path::new("./bin/")), 1);
    }
}
