//! Path resolution for the build directory and exclusion config
//!
//! Relative inputs are anchored at the directory holding the executable,
//! not at the caller's working directory. All helpers here are lexical:
//! nothing touches the filesystem except [`executable_dir`].

use std::path::{Component, Path, PathBuf};

use crate::error::{FilterError, Result};

/// Default build directory, relative to the anchor
pub const DEFAULT_BUILD_DIR: &str = "../../_build";

/// Default exclusion config, relative to the anchor
pub const DEFAULT_CONFIG_FILE: &str = "excludes_clang_tidy.json";

/// Directory containing the running executable
pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(FilterError::AnchorUnavailable)?;
    let dir = exe.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(normalize(&dir))
}

/// Resolve `input` against `anchor` unless it is already absolute
pub fn resolve(anchor: &Path, input: &Path) -> PathBuf {
    if input.is_absolute() {
        input.to_path_buf()
    } else {
        normalize(&anchor.join(input))
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into its parent
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Express `path` relative to `base`, the way `relpath` does
///
/// Both paths are normalized first. Equal paths yield `.`.
pub fn relative_path(path: &Path, base: &Path) -> PathBuf {
    let path = normalize(path);
    let base = normalize(base);

    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base_parts.len() {
        rel.push("..");
    }
    for part in &path_parts[common..] {
        rel.push(part.as_os_str());
    }

    if rel.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        rel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_keeps_absolute_input() {
        let anchor = Path::new("/opt/tools/clang-tidy");
        assert_eq!(
            resolve(anchor, Path::new("/var/build")),
            PathBuf::from("/var/build")
        );
    }

    #[test]
    fn test_resolve_default_build_dir() {
        let anchor = Path::new("/repo/build_linux/clang-tidy");
        assert_eq!(
            resolve(anchor, Path::new(DEFAULT_BUILD_DIR)),
            PathBuf::from("/repo/_build")
        );
    }

    #[test]
    fn test_resolve_default_config_file() {
        let anchor = Path::new("/repo/build_linux/clang-tidy");
        assert_eq!(
            resolve(anchor, Path::new(DEFAULT_CONFIG_FILE)),
            PathBuf::from("/repo/build_linux/clang-tidy/excludes_clang_tidy.json")
        );
    }

    #[test]
    fn test_normalize_drops_cur_dir_and_folds_parent() {
        assert_eq!(
            normalize(Path::new("/a/./b/../c/")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
    }

    #[test]
    fn test_relative_path_descendant() {
        assert_eq!(
            relative_path(Path::new("/proj/vendor/zlib"), Path::new("/proj")),
            PathBuf::from("vendor/zlib")
        );
    }

    #[test]
    fn test_relative_path_sibling() {
        assert_eq!(
            relative_path(Path::new("/proj/src"), Path::new("/proj/tools/tidy")),
            PathBuf::from("../../src")
        );
    }

    #[test]
    fn test_relative_path_equal_is_dot() {
        assert_eq!(
            relative_path(Path::new("/proj"), Path::new("/proj/")),
            PathBuf::from(".")
        );
    }

    #[test]
    fn test_executable_dir_is_absolute() {
        let dir = executable_dir().unwrap();
        assert!(dir.is_absolute());
    }
}
