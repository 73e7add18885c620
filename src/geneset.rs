//! The ordered collection of gene alignments for one run.
//!
//! Gene identifiers are file base names up to the first `.`
//! (`COI.aln.fa` -> `COI`). The set is sorted by gene identifier once, at
//! construction, and that order is the only one used downstream: both the
//! concatenator and the partition emitter walk [`GeneAlignmentSet::genes`].
//!
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::common::PhyloError;
use crate::loader::GeneAlignment;

/// Gene alignments in ascending gene-identifier order.
#[derive(Clone, Debug, Default)]
pub struct GeneAlignmentSet {
    genes: Vec<GeneAlignment>,
}

impl GeneAlignmentSet {
    /// Load one gene per file.
    ///
    /// ## Errors
    /// [`PhyloError::DuplicateGene`] if two paths share a gene identifier,
    /// otherwise whatever [`GeneAlignment::load_as`] reports for the first bad file.
    pub fn build<P: AsRef<Path>>(files: &[P]) -> Result<Self, PhyloError> {
        let mut by_gene: BTreeMap<String, PathBuf> = BTreeMap::new();
        for f in files {
            let path = f.as_ref();
            let gene = gene_id_from_path(path);
            if let Some(first) = by_gene.get(&gene) {
                return Err(PhyloError::DuplicateGene {
                    gene,
                    first: first.clone(),
                    second: path.to_path_buf(),
                });
            }
            by_gene.insert(gene, path.to_path_buf());
        }
        let genes = by_gene
            .iter()
            .map(|(gene, path)| GeneAlignment::load_as(gene, path))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { genes })
    }

    /// Load every alignment file in `dir`.
    ///
    /// Regular files whose name does not start with `.` are taken as
    /// alignments; sub-directories are skipped.
    pub fn from_dir(dir: &Path) -> Result<Self, PhyloError> {
        let files = alignment_files(dir)?;
        tracing::info!(files = files.len(), "scanning {}", dir.display());
        Self::build(&files)
    }

    /// Assemble a set from already-loaded genes, enforcing the same ordering
    /// and uniqueness rules as [`GeneAlignmentSet::build`].
    pub fn from_genes(mut genes: Vec<GeneAlignment>) -> Result<Self, PhyloError> {
        genes.sort_by(|a, b| a.gene_id().cmp(b.gene_id()));
        if let Some(w) = genes.windows(2).find(|w| w[0].gene_id() == w[1].gene_id()) {
            let gene = w[0].gene_id().to_string();
            return Err(PhyloError::DuplicateGene {
                first: PathBuf::from(&gene),
                second: PathBuf::from(&gene),
                gene,
            });
        }
        Ok(Self { genes })
    }

    /// Genes in processing order.
    pub fn genes(&self) -> &[GeneAlignment] { &self.genes }

    /// Gene identifiers in processing order.
    pub fn gene_ids(&self) -> impl Iterator<Item = &str> {
        self.genes.iter().map(GeneAlignment::gene_id)
    }

    /// Sum of gene widths, i.e. the width of the concatenated alignment.
    pub fn total_width(&self) -> usize {
        self.genes.iter().map(GeneAlignment::width).sum()
    }

    pub fn len(&self) -> usize { self.genes.len() }

    pub fn is_empty(&self) -> bool { self.genes.is_empty() }
}

/// Gene identifier of an alignment file: base name up to the first `.`.
pub fn gene_id_from_path(path: &Path) -> String {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    name.split('.').next().unwrap_or_default().to_string()
}

/// List candidate alignment files in `dir`, sorted by path.
pub fn alignment_files(dir: &Path) -> Result<Vec<PathBuf>, PhyloError> {
    let unreadable = |source| PhyloError::UnreadableFile { path: dir.to_path_buf(), source };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        if entry.file_name().to_string_lossy().starts_with('.') { continue; }
        let file_type = entry.file_type().map_err(unreadable)?;
        if file_type.is_dir() { continue; }
        files.push(entry.path());
    }
    files.sort();
    Ok(files)
}
