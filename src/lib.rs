//! compdb-filter - split a JSON compilation database for static analysis
//!
//! Sources living under configured directories are moved into a separate
//! database so clang-tidy skips them, and `-I` flags pointing at those
//! directories become `-isystem` so their headers are skipped as well.

pub mod cli;
pub mod compdb;
pub mod error;
pub mod excludes;
pub mod partition;
pub mod paths;
pub mod pipeline;
pub mod rewrite;

pub use error::{FilterError, InputKind, Result};
pub use pipeline::{run, FilterContext, MissingFilePolicy, Outcome, Summary};
