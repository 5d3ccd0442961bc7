#![deny(missing_docs)]

//! # P2O CLI
//!
//! Command Line Interface for converting API collections into OpenAPI documents.
//!
//! Supported Commands:
//! - `convert`: Collection JSON -> OpenAPI 3.0 (JSON or YAML).

use clap::{Parser, Subcommand};
use p2o_core::AppResult;

mod convert;
mod logging;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Collection to OpenAPI converter")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[clap(long, short, global = true, env = "P2O_VERBOSE")]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Converts a collection file into an OpenAPI document.
    Convert(convert::ConvertArgs),
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;

    match &cli.command {
        Commands::Convert(args) => convert::execute(args)?,
    }

    Ok(())
}
