use anyhow::Result;
use clap::Parser;
use compdb_filter::{cli::Cli, paths, pipeline, MissingFilePolicy, Outcome};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let anchor = match args.anchor {
        Some(dir) => std::env::current_dir()?.join(dir),
        None => paths::executable_dir()?,
    };

    let policy = if args.skip_missing {
        MissingFilePolicy::Skip
    } else {
        pipeline::DEFAULT_MISSING_FILE_POLICY
    };

    let ctx = pipeline::FilterContext::new(&anchor, &args.build, &args.config)
        .with_missing_file_policy(policy)
        .with_system_headers(!args.no_system_headers);

    match pipeline::run(&ctx)? {
        Outcome::Completed(summary) => {
            tracing::debug!(
                included = %summary.included_path.display(),
                excluded = %summary.excluded_path.display(),
                "outputs written"
            );
        }
        Outcome::Skipped { kind, path } => {
            println!(
                "ERROR - {} is missing, skipping further processing: {}",
                kind,
                path.display()
            );
        }
    }

    Ok(())
}
