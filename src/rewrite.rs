//! Include flag rewriting for excluded directories
//!
//! Headers reached through `-I<dir>` for an excluded `<dir>` would still be
//! analyzed when an included source pulls them in. Turning the flag into
//! `-isystem <dir>` makes the analyzer treat them as system headers.
//!
//! Two forms are handled:
//! - `command` strings get a verbatim substring replacement. This relies on
//!   the build generator spelling the flag exactly as `-I<dir>`.
//! - `arguments` arrays are rewritten token by token, accepting both `-I<dir>`
//!   and `-I <dir>`, and also directories nested below `<dir>`.

use std::path::{Path, MAIN_SEPARATOR};

use crate::compdb::CompileEntry;
use crate::excludes::ExclusionFragment;

const INCLUDE_FLAG: &str = "-I";
const SYSTEM_FLAG: &str = "-isystem";

/// Plain/system include flag pair for one excluded directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagRewrite {
    dir: String,
    include: String,
    system: String,
}

impl FlagRewrite {
    pub fn new(dir: &Path) -> Self {
        let dir = dir.display().to_string();
        Self {
            include: format!("{INCLUDE_FLAG}{dir}"),
            system: format!("{SYSTEM_FLAG} {dir}"),
            dir,
        }
    }

    /// `-I<dir>`
    pub fn include_flag(&self) -> &str {
        &self.include
    }

    /// `-isystem <dir>`
    pub fn system_flag(&self) -> &str {
        &self.system
    }

    /// Whether `path` is the excluded directory or lies below it
    fn covers(&self, path: &str) -> bool {
        match path.strip_prefix(self.dir.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with(MAIN_SEPARATOR),
            None => false,
        }
    }
}

/// All flag rewrites for a set of exclusion fragments
#[derive(Debug, Clone, Default)]
pub struct HeaderRewriter {
    rules: Vec<FlagRewrite>,
}

impl HeaderRewriter {
    /// Build rewrites for `excludes`, resolving each fragment under `anchor`
    pub fn new(excludes: &[ExclusionFragment], anchor: &Path) -> Self {
        let rules = excludes
            .iter()
            .map(|fragment| FlagRewrite::new(&fragment.include_dir(anchor)))
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[FlagRewrite] {
        &self.rules
    }

    /// Replace every `-I<dir>` in `command`, one rule after another
    ///
    /// Returns `None` when nothing changed.
    pub fn rewrite_command(&self, command: &str) -> Option<String> {
        let mut current = command.to_string();
        let mut changed = false;
        for rule in &self.rules {
            if current.contains(rule.include_flag()) {
                current = current.replace(rule.include_flag(), rule.system_flag());
                changed = true;
            }
        }
        changed.then_some(current)
    }

    /// Rewrite include arguments that point into an excluded directory
    ///
    /// Returns `None` when nothing changed.
    pub fn rewrite_arguments(&self, arguments: &[&str]) -> Option<Vec<String>> {
        let mut out = Vec::with_capacity(arguments.len());
        let mut changed = false;
        let mut iter = arguments.iter().copied().peekable();

        while let Some(arg) = iter.next() {
            if arg == INCLUDE_FLAG {
                if let Some(&dir) = iter.peek() {
                    if self.rules.iter().any(|rule| rule.covers(dir)) {
                        out.push(SYSTEM_FLAG.to_string());
                        out.push(dir.to_string());
                        iter.next();
                        changed = true;
                        continue;
                    }
                }
            } else if let Some(dir) = arg.strip_prefix(INCLUDE_FLAG) {
                if self.rules.iter().any(|rule| rule.covers(dir)) {
                    out.push(SYSTEM_FLAG.to_string());
                    out.push(dir.to_string());
                    changed = true;
                    continue;
                }
            }
            out.push(arg.to_string());
        }

        changed.then_some(out)
    }

    /// Rewrite one entry in place; returns whether it changed
    pub fn rewrite_entry(&self, entry: &mut CompileEntry) -> bool {
        let mut changed = false;

        let command = entry
            .command()
            .and_then(|command| self.rewrite_command(command));
        if let Some(rewritten) = command {
            tracing::debug!("-- {}", entry.command().unwrap_or_default());
            tracing::debug!("++ {}", rewritten);
            entry.set_command(rewritten);
            changed = true;
        }

        let arguments = entry
            .arguments()
            .and_then(|arguments| self.rewrite_arguments(&arguments));
        if let Some(rewritten) = arguments {
            tracing::debug!(file = entry.file(), "rewrote include arguments");
            entry.set_arguments(rewritten);
            changed = true;
        }

        changed
    }

    /// Rewrite every entry; returns how many changed
    pub fn rewrite_all(&self, entries: &mut [CompileEntry]) -> usize {
        entries
            .iter_mut()
            .map(|entry| self.rewrite_entry(entry))
            .filter(|changed| *changed)
            .count()
    }
}
