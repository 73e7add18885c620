//! CLI for `phylocat concat`.
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::Args;
use phylocat::*;
use tempfile::NamedTempFile;

#[derive(Debug, Args)]
pub struct ConcatCmd {
    /// Directory holding one FASTA alignment per gene (gene id = file name up to the first '.').
    #[arg(long, value_name="DIR", default_value="alignments")]
    pub indir: PathBuf,
    /// Output concatenated alignment (FASTA).
    #[arg(long, default_value="concatenated.fa")]
    pub outfile: PathBuf,
    /// Also write the partition text to this file (it is always printed to stdout).
    #[arg(long, value_name="FILE")]
    pub partitions: Option<PathBuf>,
    /// Protein-coding gene to split by codon position; repeatable. Replaces the built-in list.
    #[arg(long="coding", value_name="GENE")]
    pub coding: Vec<String>,
    /// Treat every gene as non-coding.
    #[arg(long, conflicts_with="coding")]
    pub no_coding: bool,
}

impl ConcatCmd {
    fn coding_genes(&self) -> CodingGenes {
        if self.no_coding {
            CodingGenes::none()
        } else if self.coding.is_empty() {
            CodingGenes::default()
        } else {
            self.coding.iter().cloned().collect()
        }
    }
}

pub fn run(cmd: ConcatCmd) -> Result<()> {
    let set = GeneAlignmentSet::from_dir(&cmd.indir)
        .with_context(|| format!("load alignments: {}", cmd.indir.display()))?;
    if set.is_empty() { anyhow::bail!("no alignment files in {}", cmd.indir.display()); }
    let universe = SpeciesUniverse::build(&set);
    tracing::info!(genes = set.len(), species = universe.len(), width = set.total_width(), "concatenating");

    let cat = concatenate(&set, &universe);
    let parts = emit_partitions(&set, &cmd.coding_genes());

    // stage every output next to its destination; nothing is renamed into place until all writes succeed
    let mut staged = vec![stage(&cmd.outfile, |w| cat.write_fasta(w))?];
    if let Some(path) = &cmd.partitions {
        staged.push(stage(path, |w| write_partitions(&parts, w))?);
    }
    for (tmp, dest) in staged {
        tmp.persist(&dest).with_context(|| format!("write {}", dest.display()))?;
    }
    write_partitions(&parts, io::stdout().lock()).context("write partitions to stdout")?;
    Ok(())
}

/// Write `dest`'s content into a temporary file in the same directory.
fn stage<F>(dest: &Path, fill: F) -> Result<(NamedTempFile, PathBuf)>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> io::Result<()>,
{
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| format!("create {}", dest.display()))?;
    {
        let mut w = BufWriter::new(&mut tmp);
        fill(&mut w).and_then(|_| w.flush()).with_context(|| format!("write {}", dest.display()))?;
    }
    Ok((tmp, dest.to_path_buf()))
}
