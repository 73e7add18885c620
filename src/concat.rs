//! Supermatrix concatenation and FASTA output.
//!
//! For each gene in set order, every species in the universe receives either
//! its own sequence or a run of `-` exactly as wide as the gene. All rows of
//! the result therefore have the same length, the sum of the gene widths.
//!
//! ### Example
//! ```rust
//! use std::path::Path;
//! use phylocat::{concatenate, GeneAlignment, GeneAlignmentSet, SpeciesUniverse};
//! let p = Path::new("mem");
//! let set = GeneAlignmentSet::from_genes(vec![
//!     GeneAlignment::parse("geneA", ">X\nACGT\n>Y\nTTTT\n", p).unwrap(),
//!     GeneAlignment::parse("geneB", ">X\nAA\n", p).unwrap(),
//! ]).unwrap();
//! let cat = concatenate(&set, &SpeciesUniverse::build(&set));
//! assert_eq!(cat.get("Y"), Some("TTTT--"));
//! ```
//!
use std::collections::BTreeMap;
use std::io::Write;

use crate::common::{GAP, HEADER_MARKER};
use crate::geneset::GeneAlignmentSet;
use crate::species::SpeciesUniverse;

/// Species to concatenated row, all rows of equal width.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConcatenatedAlignment {
    width: usize,
    rows: BTreeMap<String, String>,
}

impl ConcatenatedAlignment {
    /// Row for `species`.
    pub fn get(&self, species: &str) -> Option<&str> { self.rows.get(species).map(String::as_str) }

    /// Shared row width.
    pub fn width(&self) -> usize { self.width }

    /// Rows in ascending species order.
    pub fn rows(&self) -> &BTreeMap<String, String> { &self.rows }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Write one `>species` record per row, in ascending species order.
    pub fn write_fasta<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        for (species, seq) in &self.rows {
            writeln!(w, "{HEADER_MARKER}{species}")?;
            writeln!(w, "{seq}")?;
        }
        w.flush()
    }

    /// FASTA text of the whole alignment.
    pub fn to_fasta(&self) -> String {
        let mut out = String::with_capacity(self.rows.len() * (self.width + 16));
        for (species, seq) in &self.rows {
            out.push(HEADER_MARKER); out.push_str(species); out.push('\n');
            out.push_str(seq); out.push('\n');
        }
        out
    }
}

/// Concatenate all genes of `set` for every species in `universe`.
pub fn concatenate(set: &GeneAlignmentSet, universe: &SpeciesUniverse) -> ConcatenatedAlignment {
    let width = set.total_width();
    let mut acc: Vec<String> = universe.iter().map(|_| String::with_capacity(width)).collect();
    for gene in set.genes() {
        let gap_run: String = std::iter::repeat(GAP).take(gene.width()).collect();
        let mut missing = 0usize;
        for (species, row) in universe.iter().zip(acc.iter_mut()) {
            match gene.sequence(species) {
                Some(seq) => row.push_str(seq),
                None => { row.push_str(&gap_run); missing += 1; }
            }
        }
        tracing::debug!(gene = gene.gene_id(), width = gene.width(), missing, "gene appended");
    }
    let rows = universe.iter().map(str::to_string).zip(acc).collect();
    ConcatenatedAlignment { width, rows }
}
