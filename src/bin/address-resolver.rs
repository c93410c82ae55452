//! Address resolver CLI binary.

use std::process;

use address_resolver::cli::{args::ResolverArgs, commands::execute_command};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = ResolverArgs::parse();

    // RUST_LOG wins over the -v/-q flags when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
