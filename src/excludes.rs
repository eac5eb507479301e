//! Exclusion list loading
//!
//! The config file is a JSON array of arrays of directory names, e.g.
//! `[["third_party"], ["ext", "vendor"]]`. Each inner array becomes one
//! [`ExclusionFragment`], joined with the platform separator and anchored with
//! a leading one so `lib` never matches inside `liblib`.

use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use crate::error::{FilterError, InputKind, Result};

/// A normalized directory-name sequence to exclude
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionFragment {
    pattern: String,
}

impl ExclusionFragment {
    /// Build a fragment from its directory-name segments
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Self {
        let joined = segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(MAIN_SEPARATOR_STR);
        Self {
            pattern: format!("{MAIN_SEPARATOR_STR}{joined}"),
        }
    }

    /// The anchored pattern, e.g. `/third_party/vendor`
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The pattern without its leading separators, e.g. `third_party/vendor`
    pub fn relative(&self) -> &str {
        self.pattern.trim_start_matches(MAIN_SEPARATOR_STR)
    }

    /// Whether a separator-prefixed directory string contains this fragment
    ///
    /// The leading separator pins the start of the first segment; the match
    /// must also end at a separator or at the end of `path_str`, unless the
    /// pattern itself already ends with one.
    pub fn matches(&self, path_str: &str) -> bool {
        if self.pattern.ends_with(MAIN_SEPARATOR) {
            return path_str.contains(self.pattern.as_str());
        }
        path_str.match_indices(self.pattern.as_str()).any(|(start, _)| {
            let rest = &path_str[start + self.pattern.len()..];
            rest.is_empty() || rest.starts_with(MAIN_SEPARATOR)
        })
    }

    /// Absolute include directory this fragment denotes under `anchor`
    pub fn include_dir(&self, anchor: &Path) -> PathBuf {
        anchor.join(self.relative())
    }
}

/// Load the exclusion config at `path`
pub fn load_excludes(path: &Path) -> Result<Vec<ExclusionFragment>> {
    if !path.exists() {
        return Err(FilterError::MissingInput {
            kind: InputKind::ExclusionConfig,
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path).map_err(|source| FilterError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: Vec<Vec<String>> =
        serde_json::from_str(&contents).map_err(|source| FilterError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    let excludes: Vec<ExclusionFragment> = raw
        .iter()
        .map(|segments| ExclusionFragment::from_segments(segments.as_slice()))
        .collect();

    tracing::debug!(
        count = excludes.len(),
        fragments = ?excludes.iter().map(ExclusionFragment::as_str).collect::<Vec<_>>(),
        "loaded excluded directories"
    );

    Ok(excludes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_fragment_single_segment() {
        let fragment = ExclusionFragment::from_segments(&["vendor"]);
        assert_eq!(fragment.as_str(), "/vendor");
        assert_eq!(fragment.relative(), "vendor");
    }

    #[test]
    fn test_fragment_joins_segments() {
        let fragment = ExclusionFragment::from_segments(&["third_party", "googletest"]);
        assert_eq!(fragment.as_str(), "/third_party/googletest");
    }

    #[test]
    fn test_fragment_rejects_partial_segment() {
        let fragment = ExclusionFragment::from_segments(&["lib"]);
        assert!(fragment.matches("/src/lib/core"));
        assert!(fragment.matches("/src/lib"));
        assert!(!fragment.matches("/src/liblib/core"));
        assert!(!fragment.matches("/src/xlib/core"));
        assert!(!fragment.matches("/src/library"));
    }

    #[test]
    fn test_fragment_with_trailing_separator() {
        let fragment = ExclusionFragment::from_segments(&["vendor/"]);
        assert_eq!(fragment.as_str(), "/vendor/");
        assert!(fragment.matches("/../../../proj/vendor/x"));
        assert!(!fragment.matches("/proj/vendor"));
        assert!(!fragment.matches("/proj/vendors/x"));
    }

    #[test]
    fn test_empty_rule_matches_everything() {
        let fragment = ExclusionFragment::from_segments::<&str>(&[]);
        assert_eq!(fragment.as_str(), "/");
        assert!(fragment.matches("/."));
        assert!(fragment.matches("/src"));
        assert!(fragment.matches("/../../ext/zlib"));
    }

    #[test]
    fn test_load_excludes_trailing_separator_and_empty_rule() {
        let file = create_temp_config(r#"[["vendor/"], []]"#);
        let excludes = load_excludes(file.path()).unwrap();
        let patterns: Vec<&str> = excludes.iter().map(ExclusionFragment::as_str).collect();
        assert_eq!(patterns, vec!["/vendor/", "/"]);
    }

    #[test]
    fn test_fragment_checks_every_occurrence() {
        let fragment = ExclusionFragment::from_segments(&["gen"]);
        assert!(fragment.matches("/gen2/gen/x"));
    }

    #[test]
    fn test_include_dir_under_anchor() {
        let fragment = ExclusionFragment::from_segments(&["ext", "zlib"]);
        assert_eq!(
            fragment.include_dir(Path::new("/proj")),
            PathBuf::from("/proj/ext/zlib")
        );
    }

    #[test]
    fn test_load_excludes_preserves_order() {
        let file = create_temp_config(r#"[["vendor"], ["third_party", "fmt"], ["gen"]]"#);
        let excludes = load_excludes(file.path()).unwrap();
        let patterns: Vec<&str> = excludes.iter().map(ExclusionFragment::as_str).collect();
        assert_eq!(patterns, vec!["/vendor", "/third_party/fmt", "/gen"]);
    }

    #[test]
    fn test_load_excludes_empty_list() {
        let file = create_temp_config("[]");
        assert!(load_excludes(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_load_excludes_missing_file() {
        let err = load_excludes(Path::new("/nonexistent/excludes.json")).unwrap_err();
        assert!(matches!(
            err,
            FilterError::MissingInput {
                kind: InputKind::ExclusionConfig,
                ..
            }
        ));
    }

    #[test]
    fn test_load_excludes_invalid_json() {
        let file = create_temp_config("[[\"vendor\"");
        let err = load_excludes(file.path()).unwrap_err();
        assert!(matches!(err, FilterError::Malformed { .. }));
    }

    #[test]
    fn test_load_excludes_wrong_shape() {
        let file = create_temp_config(r#"["vendor"]"#);
        assert!(load_excludes(file.path()).is_err());
    }
}
