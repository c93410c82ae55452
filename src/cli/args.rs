//! Command line argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::resolver::ResolveOptions;

/// Address resolver: corrects noisy address lines and matches them against an
/// address registry graph
#[derive(Parser, Debug, Clone)]
#[command(name = "address-resolver")]
#[command(about = "Resolve free-form postal addresses against an address registry")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ResolverArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Resolver configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG", env = "ADDRESS_RESOLVER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ResolverArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// The log filter matching the verbosity level.
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity() {
            0 => "error",
            1 => "warn",
            2 => "info",
            _ => "debug",
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Correct the spelling of address lines
    Correct(CorrectArgs),

    /// Print the lookup query for address lines
    Query(QueryArgs),

    /// Resolve address lines against rows loaded from a JSON file
    Resolve(ResolveArgs),

    /// Turn query result rows into addresses
    Assemble(AssembleArgs),
}

/// Arguments for spelling correction
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Input file with one address per line (default: stdin)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,
}

/// Arguments for query synthesis
#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    /// Input file with one address per line (default: stdin)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Match house numbers as well as address objects
    #[arg(long)]
    pub house: bool,

    /// Skip spelling correction
    #[arg(long)]
    pub no_correct: bool,
}

impl QueryArgs {
    /// Resolution options selected by the flags.
    pub fn options(&self) -> ResolveOptions {
        ResolveOptions {
            addrobj_only: !self.house,
            check_grammar: !self.no_correct,
        }
    }
}

/// Arguments for resolution
#[derive(Parser, Debug, Clone)]
pub struct ResolveArgs {
    /// Input file with one address per line (default: stdin)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Rows returned for every query (JSON)
    #[arg(short, long, value_name = "ROWS_JSON")]
    pub rows: PathBuf,

    /// Match house numbers as well as address objects
    #[arg(long)]
    pub house: bool,

    /// Correct the spelling of address words before querying
    #[arg(long)]
    pub check_grammar: bool,

    /// Prefix each result with the input line
    #[arg(long)]
    pub show_input: bool,

    /// Include the formatted address in each result
    #[arg(long)]
    pub show_address: bool,
}

impl ResolveArgs {
    /// Resolution options selected by the flags.
    pub fn options(&self) -> ResolveOptions {
        ResolveOptions {
            addrobj_only: !self.house,
            check_grammar: self.check_grammar,
        }
    }
}

/// Arguments for row assembly
#[derive(Parser, Debug, Clone)]
pub struct AssembleArgs {
    /// Query result rows (JSON array of objects)
    #[arg(value_name = "ROWS_JSON")]
    pub rows: PathBuf,

    /// Include the formatted address in each result
    #[arg(long)]
    pub show_address: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
