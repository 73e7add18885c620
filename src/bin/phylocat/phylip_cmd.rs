//! CLI for `phylocat fasta2phylip`.
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use phylocat::*;

#[derive(Debug, Args)]
pub struct PhylipCmd {
    /// Alignment in FASTA format.
    #[arg(long="in", alias="infile", value_name="FILE", default_value="infile")]
    pub infile: PathBuf,
    /// Output sequential Phylip file.
    #[arg(long="out", alias="outfile", value_name="FILE", default_value="outfile")]
    pub outfile: PathBuf,
}

pub fn run(cmd: PhylipCmd) -> Result<()> {
    let text = read_text(&cmd.infile)?;
    let recs = parse_fasta_records(&text, &cmd.infile)?;
    let out = phylip_text(&recs, &cmd.infile)?;
    tracing::info!(records = recs.len(), "converted {}", cmd.infile.display());
    std::fs::write(&cmd.outfile, out).with_context(|| format!("write {}", cmd.outfile.display()))?;
    Ok(())
}
