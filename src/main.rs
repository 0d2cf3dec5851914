use clap::Parser;
use tracing_subscriber::EnvFilter;

use chirp::cli::Cli;

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; warnings and above unless RUST_LOG says otherwise.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    chirp::run(Cli::parse())
}
