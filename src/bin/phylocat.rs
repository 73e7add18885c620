//! Command-line interface for the `phylocat` crate.
//!
//! Subcommands are implemented in separate files (modules) under `src/bin/phylocat/`:
//! - `concat_cmd.rs`
//! - `phylip_cmd.rs`
//! - `subset_cmd.rs`
//!
//! Diagnostics go to stderr; stdout carries only partition text.
use clap::{Parser, Subcommand};
use anyhow::Result;

#[derive(Debug, Parser)]
#[command(name="phylocat", version=env!("CARGO_PKG_VERSION"), about="Concatenate per-gene alignments and emit RAxML partitions", disable_help_subcommand=true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action=clap::ArgAction::Count, global=true)]
    verbose: u8,
    /// Only log errors.
    #[arg(short, long, global=true, conflicts_with="verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Concatenate a directory of gene alignments into one supermatrix.
    #[command(visible_alias = "cat")]
    Concat(concat_cmd::ConcatCmd),
    /// Convert a FASTA alignment to sequential Phylip.
    #[command(name = "fasta2phylip")]
    Fasta2Phylip(phylip_cmd::PhylipCmd),
    /// Keep only species present in a minimum number of genes.
    Subset(subset_cmd::SubsetCmd),
}

#[path = "phylocat/concat_cmd.rs"] mod concat_cmd;
#[path = "phylocat/phylip_cmd.rs"] mod phylip_cmd;
#[path = "phylocat/subset_cmd.rs"] mod subset_cmd;

fn init_logging(verbose: u8, quiet: bool) {
    use tracing::Level;
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    match cli.command {
        Command::Concat(cmd) => concat_cmd::run(cmd),
        Command::Fasta2Phylip(cmd) => phylip_cmd::run(cmd),
        Command::Subset(cmd) => subset_cmd::run(cmd),
    }
}
