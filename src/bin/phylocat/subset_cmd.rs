//! CLI for `phylocat subset` (species filtering by gene coverage).
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use phylocat::*;

#[derive(Debug, Args)]
pub struct SubsetCmd {
    /// Directory holding one FASTA alignment per gene.
    #[arg(long, value_name="DIR", default_value="alignments")]
    pub indir: PathBuf,
    /// Directory for the filtered `<gene>.valid.fa` files.
    #[arg(long, value_name="DIR", default_value=".")]
    pub outdir: PathBuf,
    /// Minimum number of genes a species must have.
    #[arg(long, alias="minseq", default_value_t=4)]
    pub min_genes: usize,
    /// Optional coverage report (TSV).
    #[arg(long, value_name="FILE")]
    pub report: Option<PathBuf>,
}

pub fn run(cmd: SubsetCmd) -> Result<()> {
    let set = GeneAlignmentSet::from_dir(&cmd.indir)
        .with_context(|| format!("load alignments: {}", cmd.indir.display()))?;
    let params = SubsetParams { min_genes: cmd.min_genes };
    let coverage = species_coverage(&set, &params)?;

    std::fs::create_dir_all(&cmd.outdir).with_context(|| format!("mkdir {}", cmd.outdir.display()))?;
    for (gene, text) in valid_gene_subsets(&set, &coverage) {
        let path = cmd.outdir.join(format!("{gene}.valid.fa"));
        std::fs::write(&path, text).with_context(|| format!("write {}", path.display()))?;
    }

    if let Some(report) = &cmd.report {
        let mut w = csv::WriterBuilder::new().delimiter(b'\t').from_path(report)
            .with_context(|| format!("create {}", report.display()))?;
        w.write_record(["species", "genes", "valid"])?;
        for c in &coverage {
            let genes = c.genes.to_string();
            w.write_record([c.species.as_str(), genes.as_str(), if c.valid { "yes" } else { "no" }])?;
        }
        w.flush()?;
    }
    Ok(())
}
