//! CLI argument parsing for compdb-filter

use clap::Parser;
use std::path::PathBuf;

use crate::paths::{DEFAULT_BUILD_DIR, DEFAULT_CONFIG_FILE};

#[derive(Parser, Debug)]
#[command(name = "compdb-filter")]
#[command(version)]
#[command(
    about = "Filter compilation database so that excluded directories stay out of clang-tidy's scope",
    long_about = "Reads compile_commands.json from the build directory and splits it into \
                  compile_commands_inc.json and compile_commands_exc.json. Sources under an \
                  excluded directory go to the excluded file; include flags pointing at an \
                  excluded directory are turned into system includes in the included file."
)]
pub struct Cli {
    /// Build directory holding compile_commands.json (relative paths are anchored at the executable's directory)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_BUILD_DIR)]
    pub build: PathBuf,

    /// JSON file listing excluded directories (relative paths are anchored at the executable's directory)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory to anchor relative paths at instead of the executable's directory
    #[arg(long, value_name = "DIR")]
    pub anchor: Option<PathBuf>,

    /// Exit successfully without writing anything when an input file is missing
    #[arg(long = "skip-missing")]
    pub skip_missing: bool,

    /// Keep -I flags of excluded directories instead of turning them into -isystem
    #[arg(long = "no-system-headers")]
    pub no_system_headers: bool,

    /// Print debug output (resolved paths, per-file decisions, rewrites) to stderr
    #[arg(short, long)]
    pub debug: bool,
}
