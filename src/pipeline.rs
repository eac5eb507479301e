//! End-to-end filter run
//!
//! Load excludes, load the database, partition, rewrite include flags and
//! write both halves. Every stage takes its inputs from [`FilterContext`] and
//! hands its output to the next one; nothing outlives [`run`].

use std::path::{Path, PathBuf};

use crate::compdb::{self, EXCLUDED_FILE, INCLUDED_FILE};
use crate::error::{FilterError, InputKind, Result};
use crate::excludes;
use crate::partition;
use crate::paths;
use crate::rewrite::HeaderRewriter;

/// What to do when the exclusion config or database is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingFilePolicy {
    /// Return [`FilterError::MissingInput`]
    Fail,
    /// Report the missing file and finish with [`Outcome::Skipped`]
    Skip,
}

/// Policy used when `--skip-missing` is not given
pub const DEFAULT_MISSING_FILE_POLICY: MissingFilePolicy = MissingFilePolicy::Fail;

/// Resolved inputs for one run
#[derive(Debug, Clone)]
pub struct FilterContext {
    /// Directory relative inputs and the partition test are anchored at
    pub anchor: PathBuf,
    /// Directory holding `compile_commands.json`; outputs land here too
    pub build_dir: PathBuf,
    /// Exclusion config file
    pub config_path: PathBuf,
    pub missing_file_policy: MissingFilePolicy,
    /// Rewrite `-I` into `-isystem` for excluded directories
    pub system_headers: bool,
}

impl FilterContext {
    /// Resolve `build` and `config` against `anchor`
    pub fn new(anchor: &Path, build: &Path, config: &Path) -> Self {
        let anchor = paths::normalize(anchor);
        Self {
            build_dir: paths::resolve(&anchor, build),
            config_path: paths::resolve(&anchor, config),
            anchor,
            missing_file_policy: DEFAULT_MISSING_FILE_POLICY,
            system_headers: true,
        }
    }

    pub fn with_missing_file_policy(mut self, policy: MissingFilePolicy) -> Self {
        self.missing_file_policy = policy;
        self
    }

    pub fn with_system_headers(mut self, enabled: bool) -> Self {
        self.system_headers = enabled;
        self
    }

    pub fn included_path(&self) -> PathBuf {
        self.build_dir.join(INCLUDED_FILE)
    }

    pub fn excluded_path(&self) -> PathBuf {
        self.build_dir.join(EXCLUDED_FILE)
    }
}

/// Counts and output locations of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub included: usize,
    pub excluded: usize,
    pub rewritten: usize,
    pub included_path: PathBuf,
    pub excluded_path: PathBuf,
}

/// Result of a run that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(Summary),
    /// An input was missing under [`MissingFilePolicy::Skip`]; nothing was written
    Skipped { kind: InputKind, path: PathBuf },
}

/// Run the whole filter for `ctx`
pub fn run(ctx: &FilterContext) -> Result<Outcome> {
    tracing::debug!(
        anchor = %ctx.anchor.display(),
        build = %ctx.build_dir.display(),
        config = %ctx.config_path.display(),
        "resolved paths"
    );

    match filter(ctx) {
        Err(FilterError::MissingInput { kind, path })
            if ctx.missing_file_policy == MissingFilePolicy::Skip =>
        {
            tracing::warn!(%kind, path = %path.display(), "input missing, skipping");
            Ok(Outcome::Skipped { kind, path })
        }
        other => other.map(Outcome::Completed),
    }
}

fn filter(ctx: &FilterContext) -> Result<Summary> {
    let excludes = excludes::load_excludes(&ctx.config_path)?;
    let database = compdb::load_database(&ctx.build_dir)?;
    if database.is_empty() {
        tracing::warn!(build = %ctx.build_dir.display(), "compilation database has no entries");
    }

    let mut split = partition::partition_entries(database.entries, &excludes, &ctx.anchor);

    let rewritten = if ctx.system_headers {
        HeaderRewriter::new(&excludes, &ctx.anchor).rewrite_all(&mut split.included)
    } else {
        0
    };

    let summary = Summary {
        included: split.included.len(),
        excluded: split.excluded.len(),
        rewritten,
        included_path: ctx.included_path(),
        excluded_path: ctx.excluded_path(),
    };

    compdb::write_database(&summary.included_path, &split.included)?;
    compdb::write_database(&summary.excluded_path, &split.excluded)?;

    tracing::info!(
        included = summary.included,
        excluded = summary.excluded,
        rewritten = summary.rewritten,
        "filtered compilation database"
    );

    Ok(summary)
}
