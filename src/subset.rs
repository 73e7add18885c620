//! Species filtering by gene coverage.
//!
//! A species is kept when it has a sequence in at least
//! [`SubsetParams::min_genes`] of the loaded gene alignments. Filtering is
//! applied per gene, so each gene keeps only the valid species it already
//! contains.
//!
use std::collections::BTreeMap;

use crate::common::{PhyloError, HEADER_MARKER};
use crate::geneset::GeneAlignmentSet;
use crate::species::SpeciesUniverse;

/// Parameters for [`species_coverage`].
#[derive(Clone, Debug)]
pub struct SubsetParams {
    /// Minimum number of genes a species must be present in.
    pub min_genes: usize,
}

impl Default for SubsetParams {
    fn default() -> Self { Self { min_genes: 4 } }
}

/// Per-species gene count and validity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeciesCoverage {
    pub species: String,
    pub genes: usize,
    pub valid: bool,
}

/// Count genes per species over the universe of `set`.
///
/// ## Errors
/// [`PhyloError::InvalidParameter`] if `min_genes` is zero.
pub fn species_coverage(set: &GeneAlignmentSet, params: &SubsetParams) -> Result<Vec<SpeciesCoverage>, PhyloError> {
    if params.min_genes == 0 { return Err(PhyloError::InvalidParameter("min_genes must be >= 1")); }
    let universe = SpeciesUniverse::build(set);
    let out = universe
        .iter()
        .map(|species| {
            let genes = set.genes().iter().filter(|g| g.sequence(species).is_some()).count();
            SpeciesCoverage { species: species.to_string(), genes, valid: genes >= params.min_genes }
        })
        .collect::<Vec<_>>();
    let valid = out.iter().filter(|c| c.valid).count();
    tracing::info!(species = out.len(), valid, min_genes = params.min_genes, "species coverage");
    Ok(out)
}

/// For each gene (in set order), the FASTA text of its valid species only.
pub fn valid_gene_subsets(set: &GeneAlignmentSet, coverage: &[SpeciesCoverage]) -> Vec<(String, String)> {
    let valid: BTreeMap<&str, bool> = coverage.iter().map(|c| (c.species.as_str(), c.valid)).collect();
    set.genes()
        .iter()
        .map(|g| {
            let mut text = String::new();
            for (species, seq) in g.sequences() {
                if valid.get(species.as_str()).copied().unwrap_or(false) {
                    text.push(HEADER_MARKER); text.push_str(species); text.push('\n');
                    text.push_str(seq); text.push('\n');
                }
            }
            (g.gene_id().to_string(), text)
        })
        .collect()
}
