//! Stable partition of compile entries by excluded directory

use std::path::{Path, MAIN_SEPARATOR_STR};

use crate::compdb::CompileEntry;
use crate::excludes::ExclusionFragment;
use crate::paths;

/// Entries kept in analysis scope and entries removed from it
///
/// Both sides keep the relative order of the input database.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub included: Vec<CompileEntry>,
    pub excluded: Vec<CompileEntry>,
}

impl Partition {
    pub fn total(&self) -> usize {
        self.included.len() + self.excluded.len()
    }
}

/// Separator-prefixed source directory of `entry`, relative to `anchor`
///
/// A source directory that is still relative is taken to live under `anchor`.
pub fn path_str(entry: &CompileEntry, anchor: &Path) -> String {
    let source_dir = paths::resolve(anchor, &entry.source_dir());
    let relative = paths::relative_path(&source_dir, anchor);
    format!("{MAIN_SEPARATOR_STR}{}", relative.display())
}

/// First fragment matching `path_str`, if any
pub fn matching_fragment<'a>(
    path_str: &str,
    excludes: &'a [ExclusionFragment],
) -> Option<&'a ExclusionFragment> {
    excludes.iter().find(|fragment| fragment.matches(path_str))
}

/// Split `entries` into included and excluded sets
pub fn partition_entries(
    entries: Vec<CompileEntry>,
    excludes: &[ExclusionFragment],
    anchor: &Path,
) -> Partition {
    let mut partition = Partition::default();

    for entry in entries {
        let path_str = path_str(&entry, anchor);
        match matching_fragment(&path_str, excludes) {
            Some(fragment) => {
                tracing::debug!(file = entry.file(), %path_str, fragment = fragment.as_str(), "-- excluded");
                partition.excluded.push(entry);
            }
            None => {
                tracing::debug!(file = entry.file(), %path_str, "++ included");
                partition.included.push(entry);
            }
        }
    }

    partition
}
